use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::Response;

use crate::core::errors::ApiError;
use crate::files::read_upload;
use crate::server::handlers::utils::relay_json;
use crate::state::AppState;

/// Validates the uploaded file locally, then hands it to the upstream for
/// ingestion. Nothing is sent upstream unless validation passes.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart =
        multipart.map_err(|e| ApiError::bad_request(format!("Invalid upload: {}", e.body_text())))?;

    let file = read_upload(&mut multipart, &state.config.uploads).await?;
    tracing::info!(
        file_name = %file.file_name,
        size = file.size(),
        "Forwarding upload for ingestion"
    );

    let reply = state
        .upstream
        .ingest_file(&file.file_name, file.contents)
        .await
        .map_err(|err| {
            tracing::error!("Upload to upstream failed: {}", err);
            ApiError::from(err)
        })?;

    Ok(relay_json(reply))
}
