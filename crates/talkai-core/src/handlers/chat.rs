// Chat completions endpoint

use axum::body::Body;
use axum::extract::{Json, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{debug, info};

use crate::mappers::{collect_chat_response, create_sse_stream, translate_request};
use crate::mappers::models::ChatCompletionRequest;
use crate::server::AppState;

use super::ApiError;

/// `POST /v1/chat/completions` - translate, forward, adapt.
///
/// The translated payload goes upstream exactly once; the response stream is
/// then either re-emitted as OpenAI SSE chunks (`stream: true`) or drained
/// into a single completion. Translation failures never reach the upstream.
pub async fn handle_chat_completions(
    State(state): State<AppState>,
    Json(request): Json<ChatCompletionRequest>,
) -> Result<Response, ApiError> {
    debug!(
        "Chat completion request: model={}, messages={}, stream={}",
        request.model,
        request.messages.len(),
        request.stream
    );

    let payload = translate_request(&request)?;
    debug!("Translated history has {} entries", payload.messages_history.len());

    let upstream_lines = state.upstream.send_chat(&payload).await?;

    if request.stream {
        info!("Streaming completion for model {}", request.model);
        let stream = create_sse_stream(upstream_lines, request.model.clone());
        Ok(build_sse_response(stream))
    } else {
        let response = collect_chat_response(upstream_lines, &request.model).await?;
        info!(
            "Aggregated completion for model {}: {} chars",
            request.model,
            response.choices.first().map_or(0, |c| c.message.content.len())
        );
        Ok(Json(response).into_response())
    }
}

fn build_sse_response<S>(stream: S) -> Response
where
    S: futures::Stream<Item = Result<bytes::Bytes, talkai_types::GatewayError>> + Send + 'static,
{
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(Body::from_stream(stream))
        .unwrap_or_else(|e| {
            tracing::error!("Failed to build SSE response: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal streaming setup error").into_response()
        })
}
