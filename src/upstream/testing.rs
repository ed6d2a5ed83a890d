use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use serde_json::{Map, Value};

use super::error::UpstreamError;
use super::provider::DocumentQaApi;
use super::types::{IngestedFile, IngestedFileList, UpstreamReply};

pub(crate) fn record(doc_id: &str, file_name: Option<&str>) -> IngestedFile {
    let doc_metadata = file_name.map(|name| {
        let mut meta = Map::new();
        meta.insert("file_name".to_string(), Value::String(name.to_string()));
        meta
    });
    IngestedFile {
        doc_id: doc_id.to_string(),
        doc_metadata,
    }
}

/// How a scripted delete should fail.
#[derive(Debug, Clone, Copy)]
pub(crate) enum DeleteFailure {
    Status(StatusCode),
    Transport,
}

/// In-memory stand-in for the document-QA service.
pub(crate) struct FakeQaApi {
    listing: Result<IngestedFileList, StatusCode>,
    failures: HashMap<String, DeleteFailure>,
    delete_calls: Mutex<Vec<String>>,
}

impl FakeQaApi {
    pub(crate) fn with_files(files: Vec<IngestedFile>) -> Self {
        Self {
            listing: Ok(IngestedFileList {
                object: "list".to_string(),
                model: "private-gpt".to_string(),
                data: files,
            }),
            failures: HashMap::new(),
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn unreachable_listing() -> Self {
        Self {
            listing: Err(StatusCode::SERVICE_UNAVAILABLE),
            failures: HashMap::new(),
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_delete(mut self, doc_id: &str, failure: DeleteFailure) -> Self {
        self.failures.insert(doc_id.to_string(), failure);
        self
    }

    pub(crate) fn deleted_ids(&self) -> Vec<String> {
        self.delete_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentQaApi for FakeQaApi {
    async fn list_files(&self) -> Result<IngestedFileList, UpstreamError> {
        match &self.listing {
            Ok(list) => Ok(list.clone()),
            Err(status) => Err(UpstreamError::Status {
                status: *status,
                body: Bytes::from_static(br#"{"detail":"unavailable"}"#),
            }),
        }
    }

    async fn delete_file(&self, doc_id: &str) -> Result<UpstreamReply, UpstreamError> {
        if let Ok(mut calls) = self.delete_calls.lock() {
            calls.push(doc_id.to_string());
        }

        match self.failures.get(doc_id) {
            Some(DeleteFailure::Transport) => {
                Err(UpstreamError::Request("connection reset".to_string()))
            }
            Some(DeleteFailure::Status(status)) => Ok(UpstreamReply {
                status: *status,
                headers: HeaderMap::new(),
                body: Bytes::from_static(br#"{"detail":"delete failed"}"#),
            }),
            None => Ok(UpstreamReply {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: Bytes::new(),
            }),
        }
    }
}
