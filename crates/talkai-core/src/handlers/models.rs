// Model catalog listing

use axum::extract::State;
use axum::Json;
use talkai_types::ModelList;

use crate::server::AppState;

/// `GET /v1/models` - the catalog fixed at startup, same list every call.
pub async fn handle_list_models(State(state): State<AppState>) -> Json<ModelList> {
    Json(state.catalog.model_list())
}
