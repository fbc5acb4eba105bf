// OpenAI-compatible API handlers

mod chat;
mod models;

pub use chat::handle_chat_completions;
pub use models::handle_list_models;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use talkai_types::GatewayError;

/// [`GatewayError`] adapter for the HTTP surface.
///
/// Handlers return this so `?` works on anything producing a
/// [`GatewayError`]; the conversion into an OpenAI-style error envelope
/// happens in exactly one place. [`GatewayError::Internal`] details are
/// logged here and withheld from the response body.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        Self(error)
    }
}

fn error_type(error: &GatewayError) -> &'static str {
    match error {
        GatewayError::InvalidRequest { .. } => "invalid_request_error",
        GatewayError::Unauthorized => "authentication_error",
        GatewayError::UpstreamStatus { .. } => "upstream_error",
        GatewayError::ConnectTimeout | GatewayError::ReadTimeout => "timeout_error",
        GatewayError::ConnectFailed | GatewayError::Transport { .. } => "connection_error",
        GatewayError::Internal { .. } => "internal_error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match &self.0 {
            GatewayError::Internal { .. } => {
                tracing::error!("{}", self.0);
                "Internal server error - check logs for details".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": {
                "message": message,
                "type": error_type(&self.0),
                "code": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_detail_is_withheld() {
        let response =
            ApiError(GatewayError::Internal { message: "secret stack trace".to_string() })
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_envelope_shape() {
        let response = ApiError(GatewayError::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"]["message"], "Invalid API key");
        assert_eq!(json["error"]["type"], "authentication_error");
        assert_eq!(json["error"]["code"], 401);
    }
}
