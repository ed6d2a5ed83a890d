pub mod client;
pub mod endpoints;
pub mod error;
pub mod headers;
pub mod provider;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{CallWeight, UpstreamClient};
pub use error::UpstreamError;
pub use provider::DocumentQaApi;
pub use types::{IngestedFile, IngestedFileList, UpstreamReply};
