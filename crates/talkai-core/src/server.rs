//! Router assembly and the Axum server.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use talkai_types::GatewayConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::ModelCatalog;
use crate::handlers;
use crate::middleware;
use crate::upstream::TalkAiClient;

/// Shared application state, built once at startup and read-only afterwards.
///
/// Handlers clone the `Arc`s, never the contents; no locks are involved.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub catalog: Arc<ModelCatalog>,
    pub upstream: Arc<TalkAiClient>,
}

impl AppState {
    pub fn new(config: GatewayConfig, catalog: ModelCatalog, upstream: TalkAiClient) -> Self {
        Self { config: Arc::new(config), catalog: Arc::new(catalog), upstream: Arc::new(upstream) }
    }
}

/// Build the full gateway router: OpenAI surface, health probes, auth gate,
/// permissive CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/models", get(handlers::handle_list_models))
        .route("/v1/chat/completions", post(handlers::handle_chat_completions))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.config.clone(),
            middleware::auth_middleware,
        ))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}

/// The gateway HTTP server.
pub struct GatewayServer {
    state: AppState,
}

impl GatewayServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Bind the configured address and serve until the process exits.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.state.config.listen_addr();
        tracing::info!("Starting Axum server on {}", addr);

        let app = build_router(self.state);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
