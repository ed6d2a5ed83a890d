use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::files::{self, BulkDeleteReport, ProcessingStatus};
use crate::state::AppState;
use crate::upstream::{DocumentQaApi, IngestedFileList, UpstreamError};

pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IngestedFileList>, ApiError> {
    let view = files::list_files(&state.upstream)
        .await
        .map_err(log_upstream("file listing"))?;
    Ok(Json(view.into_envelope()))
}

pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let doc_id = doc_id.trim();
    if doc_id.is_empty() {
        return Err(ApiError::bad_request("Document ID is required"));
    }

    let reply = state
        .upstream
        .delete_file(doc_id)
        .await
        .map_err(log_upstream("file deletion"))?;
    if !reply.is_ok() {
        tracing::warn!(doc_id, status = %reply.status, "Upstream refused deletion");
        return Err(ApiError::UpstreamStatus {
            status: reply.status,
            body: reply.body,
        });
    }

    tracing::info!(doc_id, "File deleted");
    Ok(Json(json!({ "message": "File deleted successfully" })))
}

/// `DELETE /api/files/` names no document.
pub async fn delete_without_id() -> ApiError {
    ApiError::bad_request("Document ID is required")
}

pub async fn delete_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BulkDeleteReport>, ApiError> {
    let result = files::delete_all(&state.upstream)
        .await
        .map_err(log_upstream("bulk delete listing"))?;
    Ok(Json(result.into_report()))
}

#[derive(Debug, Deserialize)]
pub struct ProcessingQuery {
    filename: Option<String>,
}

pub async fn processing_status(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ProcessingQuery>, QueryRejection>,
) -> Result<Json<ProcessingStatus>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let filename = query
        .filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("filename parameter is required"))?;

    let status = files::processing_status(&state.upstream, &filename)
        .await
        .map_err(log_upstream("processing status"))?;
    Ok(Json(status))
}

fn log_upstream(operation: &'static str) -> impl FnOnce(UpstreamError) -> ApiError {
    move |err| {
        tracing::error!("Upstream error during {}: {}", operation, err);
        ApiError::from(err)
    }
}

