use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::response::Response;

use crate::core::errors::ApiError;
use crate::server::handlers::chat::reject_body;
use crate::server::handlers::utils::relay;
use crate::state::AppState;

pub async fn embeddings(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let body = body.map_err(reject_body)?;
    let reply = state.upstream.embeddings(body).await.map_err(|err| {
        tracing::error!("Embeddings upstream call failed: {}", err);
        ApiError::from(err)
    })?;
    Ok(relay(reply))
}
