use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display name used when an ingested document carries no `file_name`.
pub const UNKNOWN_FILE_NAME: &str = "Unknown";

/// One ingested document as reported by `GET /v1/ingest/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestedFile {
    pub doc_id: String,
    #[serde(default)]
    pub doc_metadata: Option<Map<String, Value>>,
}

impl IngestedFile {
    pub fn file_name(&self) -> Option<&str> {
        self.doc_metadata
            .as_ref()
            .and_then(|meta| meta.get("file_name"))
            .and_then(|v| v.as_str())
    }

    pub fn display_name(&self) -> &str {
        self.file_name().unwrap_or(UNKNOWN_FILE_NAME)
    }
}

/// The `{object, model, data}` envelope around the file list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestedFileList {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub data: Vec<IngestedFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextFilter {
    pub docs_ids: Vec<String>,
}

impl ContextFilter {
    /// A filter over `docs`, or `None` when there is nothing to restrict to.
    pub fn for_docs(docs: &[String]) -> Option<Self> {
        if docs.is_empty() {
            None
        } else {
            Some(Self {
                docs_ids: docs.to_vec(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Body of `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionPayload {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub use_context: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_filter: Option<ContextFilter>,
    pub include_sources: bool,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Body of `POST /v1/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionPayload {
    pub model: String,
    pub prompt: String,
    pub use_context: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_filter: Option<ContextFilter>,
    pub include_sources: bool,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Body of `POST /v1/chunks`.
#[derive(Debug, Clone, Serialize)]
pub struct ChunksPayload {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_filter: Option<ContextFilter>,
    pub limit: u32,
    pub prev_next_chunks: u32,
    pub stream: bool,
}

/// A fully buffered upstream response, whatever its status.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl UpstreamReply {
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}
