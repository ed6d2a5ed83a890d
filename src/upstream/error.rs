use axum::body::Bytes;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection refused, DNS failure, timeout or a broken body stream.
    #[error("upstream unreachable during {operation}: {source}")]
    Unavailable {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not build upstream request: {0}")]
    Request(String),
    #[error("upstream returned status {status}")]
    Status { status: StatusCode, body: Bytes },
    #[error("unexpected upstream payload: {0}")]
    Parse(String),
}

impl UpstreamError {
    pub fn unavailable(operation: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| {
            if source.is_builder() {
                UpstreamError::Request(source.to_string())
            } else {
                UpstreamError::Unavailable { operation, source }
            }
        }
    }
}
