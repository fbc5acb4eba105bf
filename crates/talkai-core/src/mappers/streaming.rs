//! Streaming adapter: upstream token lines -> OpenAI SSE chunk frames.

use std::pin::Pin;

use bytes::Bytes;
use chrono::Utc;
use futures::{Stream, StreamExt};
use talkai_types::GatewayError;
use tracing::error;

use super::models::{completion_id, StreamChunk};
use super::{decode_newlines, event_token};

/// Serialize one chunk as an SSE frame.
fn frame(chunk: &StreamChunk) -> Bytes {
    Bytes::from(format!("data: {}\n\n", serde_json::to_string(chunk).unwrap_or_default()))
}

/// Re-emit upstream token lines as an OpenAI chat completion chunk stream.
///
/// The sequence is: one role-announcing chunk, one content chunk per
/// forwarded token, one closing chunk with `finish_reason: "stop"`, then the
/// `[DONE]` sentinel. Every chunk shares the id and timestamp fixed here at
/// stream start. Tokens are forwarded in arrival order with no buffering
/// beyond one line.
///
/// An upstream error mid-stream is logged and truncates the sequence: no
/// closing chunk and no `[DONE]`, so consumers can tell truncation from
/// completion.
pub fn create_sse_stream<S>(
    upstream_lines: S,
    model: String,
) -> Pin<Box<dyn Stream<Item = Result<Bytes, GatewayError>> + Send>>
where
    S: Stream<Item = Result<String, GatewayError>> + Send + 'static,
{
    let stream_id = completion_id();
    let created_ts = Utc::now().timestamp();

    let stream = async_stream::stream! {
        let mut upstream_lines = Box::pin(upstream_lines);

        yield Ok(frame(&StreamChunk::role_opener(&stream_id, created_ts, &model)));

        while let Some(item) = upstream_lines.next().await {
            match item {
                Ok(line) => {
                    if let Some(token) = event_token(&line) {
                        let text = decode_newlines(token);
                        yield Ok(frame(&StreamChunk::content_delta(
                            &stream_id, created_ts, &model, text,
                        )));
                    }
                }
                Err(e) => {
                    error!("Upstream stream error, truncating response: {}", e);
                    return;
                }
            }
        }

        yield Ok(frame(&StreamChunk::finish(&stream_id, created_ts, &model)));
        yield Ok(Bytes::from("data: [DONE]\n\n"));
    };

    Box::pin(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn line_stream(
        lines: Vec<Result<&str, GatewayError>>,
    ) -> impl Stream<Item = Result<String, GatewayError>> + Send + 'static {
        stream::iter(
            lines.into_iter().map(|r| r.map(str::to_string)).collect::<Vec<_>>(),
        )
    }

    async fn collect_frames(
        lines: Vec<Result<&str, GatewayError>>,
    ) -> Vec<String> {
        create_sse_stream(line_stream(lines), "m".to_string())
            .map(|r| String::from_utf8(r.unwrap().to_vec()).unwrap())
            .collect()
            .await
    }

    fn chunk_json(frame: &str) -> serde_json::Value {
        let payload = frame.strip_prefix("data: ").unwrap().trim_end();
        serde_json::from_str(payload).unwrap()
    }

    #[tokio::test]
    async fn test_happy_path_sequence() {
        let frames = collect_frames(vec![Ok("data: Hello"), Ok("data: world")]).await;

        // role opener + 2 content chunks + finish + [DONE]
        assert_eq!(frames.len(), 5);
        assert!(frames.iter().all(|f| f.starts_with("data: ") && f.ends_with("\n\n")));

        let opener = chunk_json(&frames[0]);
        assert_eq!(opener["choices"][0]["delta"]["role"], "assistant");
        assert_eq!(opener["object"], "chat.completion.chunk");

        assert_eq!(chunk_json(&frames[1])["choices"][0]["delta"]["content"], "Hello");
        assert_eq!(chunk_json(&frames[2])["choices"][0]["delta"]["content"], "world");

        let finish = chunk_json(&frames[3]);
        assert_eq!(finish["choices"][0]["finish_reason"], "stop");
        assert_eq!(finish["choices"][0]["delta"], serde_json::json!({}));

        assert_eq!(frames[4], "data: [DONE]\n\n");
    }

    #[tokio::test]
    async fn test_id_and_timestamp_shared_across_chunks() {
        let frames = collect_frames(vec![Ok("data: a"), Ok("data: b")]).await;

        let ids: Vec<String> = frames[..frames.len() - 1]
            .iter()
            .map(|f| chunk_json(f)["id"].as_str().unwrap().to_string())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert!(ids[0].starts_with("chatcmpl-"));

        let created: Vec<i64> = frames[..frames.len() - 1]
            .iter()
            .map(|f| chunk_json(f)["created"].as_i64().unwrap())
            .collect();
        assert!(created.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn test_sentinel_and_blank_lines_not_forwarded() {
        let frames =
            collect_frames(vec![Ok("data: -1"), Ok("data: hi"), Ok(""), Ok("data:")]).await;

        // opener + 1 content + finish + [DONE]
        assert_eq!(frames.len(), 4);
        assert_eq!(chunk_json(&frames[1])["choices"][0]["delta"]["content"], "hi");
    }

    #[tokio::test]
    async fn test_escapes_decoded_per_token() {
        let frames = collect_frames(vec![Ok("data: line1\\nline2")]).await;

        assert_eq!(
            chunk_json(&frames[1])["choices"][0]["delta"]["content"],
            "line1\nline2"
        );
    }

    #[tokio::test]
    async fn test_split_escape_is_not_recombined() {
        // Unlike aggregate mode, each token decodes on its own, so the two
        // halves of a split escape pass through verbatim.
        let frames = collect_frames(vec![Ok("data: abc\\"), Ok("data: ndef")]).await;

        assert_eq!(chunk_json(&frames[1])["choices"][0]["delta"]["content"], "abc\\");
        assert_eq!(chunk_json(&frames[2])["choices"][0]["delta"]["content"], "ndef");
    }

    #[tokio::test]
    async fn test_empty_upstream_still_produces_full_envelope() {
        let frames = collect_frames(vec![]).await;

        assert_eq!(frames.len(), 3);
        assert_eq!(chunk_json(&frames[0])["choices"][0]["delta"]["role"], "assistant");
        assert_eq!(chunk_json(&frames[1])["choices"][0]["finish_reason"], "stop");
        assert_eq!(frames[2], "data: [DONE]\n\n");
    }

    #[tokio::test]
    async fn test_upstream_error_truncates_without_done() {
        let frames = collect_frames(vec![
            Ok("data: partial"),
            Err(GatewayError::ReadTimeout),
            Ok("data: never"),
        ])
        .await;

        // opener + the partial content chunk, then silence
        assert_eq!(frames.len(), 2);
        assert_eq!(chunk_json(&frames[1])["choices"][0]["delta"]["content"], "partial");
        assert!(frames.iter().all(|f| !f.contains("[DONE]")));
    }
}
