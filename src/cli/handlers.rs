// HTTP Handlers Module
// Serves the derived leaderboard as JSON.

use super::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "llmboard"
    }))
}

/// GET /api/leaderboard - the full view map plus the upstream timestamp.
pub async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Response {
    match state.source.load().await {
        Ok(data) => Json(&*data).into_response(),
        Err(message) => load_error(message),
    }
}

/// GET /api/leaderboard/{view} - a single named view.
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
) -> Response {
    let data = match state.source.load().await {
        Ok(data) => data,
        Err(message) => return load_error(message),
    };

    match data.views.get(&view) {
        Some(items) => Json(serde_json::json!({
            "view": view,
            "last_updated": data.last_updated,
            "items": items,
        }))
        .into_response(),
        None => {
            tracing::debug!(view = %view, "unknown view requested");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": format!("unknown view: {view}")
                })),
            )
                .into_response()
        }
    }
}

/// Upstream load failures surface as one opaque error string.
fn load_error(message: String) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}
