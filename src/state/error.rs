use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to initialize upstream client: {0}")]
    Upstream(#[source] UpstreamError),
}
