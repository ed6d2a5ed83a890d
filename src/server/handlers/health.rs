use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// Bridge liveness plus a single probe of the upstream `/health`.
///
/// Any HTTP answer from the upstream counts as reachable; `upstream_status`
/// says whether that answer was a 200.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.upstream.health().await {
        Ok(status) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "message": "Bridge server is running",
                "upstream_status": status == StatusCode::OK,
                "upstream_url": state.upstream.base_url(),
                "uptime_seconds": state.uptime_seconds(),
            })),
        ),
        Err(err) => {
            tracing::warn!("Upstream health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "message": "Upstream API is not available",
                    "error": err.to_string(),
                })),
            )
        }
    }
}
