pub mod bulk;
pub mod registry;
pub mod status;
pub mod upload;

pub use bulk::{delete_all, BulkDeleteReport, BulkDeleteResult};
pub use registry::{list_files, DeduplicatedFileView};
pub use status::{processing_status, ProcessingStatus};
pub use upload::{read_upload, UploadedFile};
