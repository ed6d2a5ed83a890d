use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::upstream::{DocumentQaApi, IngestedFile, UpstreamError};

/// Outcome counts of one delete-all run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkDeleteResult {
    pub deleted_count: usize,
    pub failed_count: usize,
    pub total_files: usize,
    /// Display names of the records that could not be deleted, in list order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_files: Vec<String>,
}

impl BulkDeleteResult {
    fn record_success(&mut self) {
        self.deleted_count += 1;
    }

    fn record_failure(&mut self, file: &IngestedFile) {
        self.failed_count += 1;
        self.failed_files.push(file.display_name().to_string());
    }

    pub fn summary(&self) -> String {
        if self.total_files == 0 {
            return "No files to delete".to_string();
        }
        format!(
            "Bulk delete completed: {} deleted, {} failed",
            self.deleted_count, self.failed_count
        )
    }

    /// Wraps the counts in the response envelope. `success` is always true:
    /// it says the run finished, partial failure shows only in the counts.
    pub fn into_report(self) -> BulkDeleteReport {
        BulkDeleteReport {
            success: true,
            message: self.summary(),
            result: self,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkDeleteReport {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub result: BulkDeleteResult,
}

/// Deletes every ingested document, one call at a time.
///
/// Only a failed initial listing is an error. Individual delete failures
/// (transport errors or any non-200 status) are counted and the loop moves
/// on to the next record.
pub async fn delete_all(api: &dyn DocumentQaApi) -> Result<BulkDeleteResult, UpstreamError> {
    let span = tracing::info_span!("delete_all", op_id = %Uuid::new_v4());
    async move {
        tracing::info!("Starting delete all files operation");

        let files = api.list_files().await?.data;
        let mut result = BulkDeleteResult {
            total_files: files.len(),
            ..BulkDeleteResult::default()
        };

        if files.is_empty() {
            tracing::info!("No files to delete");
            return Ok(result);
        }

        tracing::info!("Deleting {} files", files.len());
        for file in &files {
            match api.delete_file(&file.doc_id).await {
                Ok(reply) if reply.is_ok() => {
                    result.record_success();
                    tracing::info!(
                        doc_id = %file.doc_id,
                        "Successfully deleted file: {}",
                        file.display_name()
                    );
                }
                Ok(reply) => {
                    result.record_failure(file);
                    tracing::warn!(
                        doc_id = %file.doc_id,
                        status = %reply.status,
                        "Failed to delete file {}",
                        file.display_name()
                    );
                }
                Err(err) => {
                    result.record_failure(file);
                    tracing::warn!(
                        doc_id = %file.doc_id,
                        "Error deleting file {}: {}",
                        file.display_name(),
                        err
                    );
                }
            }
        }

        tracing::info!(
            "Delete all files completed: {} deleted, {} failed out of {} total",
            result.deleted_count,
            result.failed_count,
            result.total_files
        );
        Ok(result)
    }
    .instrument(span)
    .await
}
