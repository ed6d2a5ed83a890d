use std::collections::BTreeMap;

use crate::upstream::{DocumentQaApi, IngestedFile, IngestedFileList, UpstreamError};

/// The upstream file list collapsed to one record per display file name.
///
/// When two records share a name, the one with the lexicographically greater
/// `doc_id` is kept. That is a freshness heuristic only: it picks the newest
/// upload if and only if the upstream hands out ids in increasing order.
/// Records without a `file_name` all share the `"Unknown"` slot, so only one
/// of them survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeduplicatedFileView {
    pub object: String,
    pub model: String,
    pub files: BTreeMap<String, IngestedFile>,
    /// Number of records before deduplication.
    pub total_records: usize,
}

impl DeduplicatedFileView {
    pub fn from_list(list: IngestedFileList) -> Self {
        let total_records = list.data.len();
        Self {
            object: list.object,
            model: list.model,
            files: deduplicate(list.data),
            total_records,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, file_name: &str) -> Option<&IngestedFile> {
        self.files.get(file_name)
    }

    /// Back into the upstream `{object, model, data}` shape for the client.
    /// Callers must not rely on the order of `data`.
    pub fn into_envelope(self) -> IngestedFileList {
        IngestedFileList {
            object: self.object,
            model: self.model,
            data: self.files.into_values().collect(),
        }
    }
}

pub fn deduplicate(records: Vec<IngestedFile>) -> BTreeMap<String, IngestedFile> {
    let mut by_name: BTreeMap<String, IngestedFile> = BTreeMap::new();
    for record in records {
        let key = record.display_name().to_string();
        match by_name.get(&key) {
            Some(existing) if existing.doc_id >= record.doc_id => {}
            _ => {
                by_name.insert(key, record);
            }
        }
    }
    by_name
}

/// Fetches the upstream file list and deduplicates it by file name.
pub async fn list_files(api: &dyn DocumentQaApi) -> Result<DeduplicatedFileView, UpstreamError> {
    let list = api.list_files().await?;
    let view = DeduplicatedFileView::from_list(list);
    tracing::info!(
        unique = view.len(),
        total = view.total_records,
        "File list returned: {} unique files (from {} total)",
        view.len(),
        view.total_records
    );
    Ok(view)
}
