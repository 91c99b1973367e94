//! API root / info endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_root))]
pub struct RootApi;

/// Register the root routes. Both `/api` and `/api/` answer.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api", get(get_root))
        .route("/api/", get(get_root))
}

/// API info message (`PORTFOLIO_API_MESSAGE`).
///
/// Has no side effects and always returns HTTP 200, so it doubles as a
/// liveness probe.
#[utoipa::path(
    get,
    path = "/api/",
    tag = "health",
    responses(
        (status = 200, description = "API is up", body = Value)
    )
)]
pub async fn get_root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "message": state.config.api_message }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
