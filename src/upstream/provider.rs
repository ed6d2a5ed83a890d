use async_trait::async_trait;

use super::error::UpstreamError;
use super::types::{IngestedFileList, UpstreamReply};

/// The slice of the document-QA API that the file registry and bulk
/// operations depend on.
#[async_trait]
pub trait DocumentQaApi: Send + Sync {
    /// fetch the raw (non-deduplicated) ingested file list
    async fn list_files(&self) -> Result<IngestedFileList, UpstreamError>;

    /// delete one ingested document; any HTTP status is returned as a reply
    async fn delete_file(&self, doc_id: &str) -> Result<UpstreamReply, UpstreamError>;
}
