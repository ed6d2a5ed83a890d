//! Paths on the document-QA service.

pub const HEALTH: &str = "/health";
pub const CHAT_COMPLETIONS: &str = "/v1/chat/completions";
pub const COMPLETIONS: &str = "/v1/completions";
pub const CHUNKS: &str = "/v1/chunks";
pub const EMBEDDINGS: &str = "/v1/embeddings";
pub const INGEST_FILE: &str = "/v1/ingest/file";
pub const INGEST_LIST: &str = "/v1/ingest/list";

/// `/v1/ingest/{doc_id}` with the id percent-encoded as one path segment.
pub fn ingested_document(doc_id: &str) -> String {
    format!("/v1/ingest/{}", urlencoding::encode(doc_id))
}
