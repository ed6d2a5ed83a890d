use serde::Serialize;

use crate::upstream::{DocumentQaApi, IngestedFileList, UpstreamError};

pub const COMPLETED_MESSAGE: &str = "File processing completed";
pub const PENDING_MESSAGE: &str = "File is still being processed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingDetail {
    pub completed: bool,
    pub message: String,
}

/// Whether an uploaded file has shown up in the ingested list yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingStatus {
    pub filename: String,
    pub exists: bool,
    pub processing: bool,
    pub status: ProcessingDetail,
}

impl ProcessingStatus {
    fn new(filename: &str, exists: bool) -> Self {
        let message = if exists {
            COMPLETED_MESSAGE
        } else {
            PENDING_MESSAGE
        };
        Self {
            filename: filename.to_string(),
            exists,
            processing: !exists,
            status: ProcessingDetail {
                completed: exists,
                message: message.to_string(),
            },
        }
    }
}

/// Exact match on the record's own `file_name`. Records without one never
/// match, not even a probe for `"Unknown"`.
pub fn probe(list: &IngestedFileList, filename: &str) -> ProcessingStatus {
    let exists = list
        .data
        .iter()
        .any(|file| file.file_name() == Some(filename));
    ProcessingStatus::new(filename, exists)
}

pub async fn processing_status(
    api: &dyn DocumentQaApi,
    filename: &str,
) -> Result<ProcessingStatus, UpstreamError> {
    let list = api.list_files().await?;
    let status = probe(&list, filename);
    tracing::debug!(
        filename,
        exists = status.exists,
        "Processing status checked"
    );
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::testing::{record, FakeQaApi};
    use serde_json::json;

    #[tokio::test]
    async fn present_file_is_completed() {
        let api = FakeQaApi::with_files(vec![record("d1", Some("report.pdf"))]);

        let status = processing_status(&api, "report.pdf")
            .await
            .expect("probe should succeed");

        assert_eq!(
            serde_json::to_value(status).expect("serializable"),
            json!({
                "filename": "report.pdf",
                "exists": true,
                "processing": false,
                "status": { "completed": true, "message": "File processing completed" }
            })
        );
    }

    #[tokio::test]
    async fn absent_file_is_still_processing() {
        let api = FakeQaApi::with_files(vec![record("d1", Some("other.pdf"))]);

        let status = processing_status(&api, "report.pdf")
            .await
            .expect("probe should succeed");

        assert!(!status.exists);
        assert!(status.processing);
        assert!(!status.status.completed);
        assert_eq!(status.status.message, "File is still being processed");
    }

    #[test]
    fn match_is_exact_and_case_sensitive() {
        let list = IngestedFileList {
            data: vec![record("d1", Some("Report.pdf"))],
            ..IngestedFileList::default()
        };

        assert!(!probe(&list, "report.pdf").exists);
        assert!(!probe(&list, "Report").exists);
        assert!(probe(&list, "Report.pdf").exists);
    }

    #[test]
    fn nameless_records_do_not_match_unknown() {
        let list = IngestedFileList {
            data: vec![record("d1", None)],
            ..IngestedFileList::default()
        };
        assert!(!probe(&list, "Unknown").exists);
    }

    #[tokio::test]
    async fn listing_failure_is_an_error() {
        let api = FakeQaApi::unreachable_listing();
        assert!(processing_status(&api, "a.pdf").await.is_err());
    }
}
