//! Aggregating adapter: drain the upstream stream into one completion.

use futures::{pin_mut, Stream, StreamExt};
use talkai_types::GatewayError;

use super::models::ChatCompletionResponse;
use super::{decode_newlines, event_token};

/// Collect every upstream token into a single non-streaming completion.
///
/// Tokens are accumulated raw and the newline escape is decoded once over
/// the joined text, so an escape split across two tokens still decodes.
/// Any upstream error aborts with that error; a partial aggregate is never
/// returned.
pub async fn collect_chat_response<S>(
    upstream_lines: S,
    model: &str,
) -> Result<ChatCompletionResponse, GatewayError>
where
    S: Stream<Item = Result<String, GatewayError>>,
{
    let mut tokens: Vec<String> = Vec::new();
    pin_mut!(upstream_lines);

    while let Some(line) = upstream_lines.next().await {
        let line = line?;
        if let Some(token) = event_token(&line) {
            tokens.push(token.to_string());
        }
    }

    let content = decode_newlines(&tokens.concat());
    Ok(ChatCompletionResponse::new(model, content))
}
