use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::chat::{translate, UnifiedChatRequest};
use crate::core::errors::ApiError;
use crate::server::handlers::utils::relay;
use crate::state::AppState;
use crate::upstream::CallWeight;

/// Translates the generic chat request for its mode and relays the upstream
/// answer unchanged.
///
/// The body is parsed by hand so a malformed request gets a JSON 400
/// whatever its content type.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let body = body.map_err(reject_body)?;
    let request: UnifiedChatRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))?;

    let translated = translate(request, &state.config.upstream.model)?;
    tracing::info!(
        mode = translated.mode.as_str(),
        endpoint = translated.endpoint,
        "Chat request"
    );

    let reply = state
        .upstream
        .post_json(
            translated.endpoint,
            &translated.payload,
            CallWeight::Heavy,
            "chat",
        )
        .await
        .map_err(|err| {
            tracing::error!(endpoint = translated.endpoint, "Chat upstream call failed: {}", err);
            ApiError::from(err)
        })?;

    Ok(relay(reply))
}

/// Body read failures (including an exceeded size limit) as a JSON 400.
pub(crate) fn reject_body(rejection: BytesRejection) -> ApiError {
    ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
}

/// Conversation history lives in the browser; there is nothing to clear here.
pub async fn clear_history() -> impl IntoResponse {
    Json(json!({ "message": "History cleared successfully" }))
}
