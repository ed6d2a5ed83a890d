use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Serialize;

use super::endpoints;
use super::error::UpstreamError;
use super::headers::forwardable_request_headers;
use super::provider::DocumentQaApi;
use super::types::{IngestedFileList, UpstreamReply};
use crate::core::config::{TimeoutConfig, UpstreamConfig};

/// How long an upstream call may take, by operation weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallWeight {
    /// Metadata and deletions.
    Light,
    /// Uploads and embeddings.
    Medium,
    /// Generation and raw proxying.
    Heavy,
}

/// HTTP client for the document-QA service.
///
/// Every call is a single attempt with a fixed timeout. Dropping the
/// returned future aborts the request, so a handler dropped on client
/// disconnect cancels its upstream call too.
#[derive(Clone)]
pub struct UpstreamClient {
    base_url: String,
    client: Client,
    timeouts: TimeoutConfig,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            timeouts: config.timeouts,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn timeout(&self, weight: CallWeight) -> Duration {
        match weight {
            CallWeight::Light => self.timeouts.short(),
            CallWeight::Medium => self.timeouts.medium(),
            CallWeight::Heavy => self.timeouts.long(),
        }
    }

    /// Status of the upstream `/health` endpoint.
    pub async fn health(&self) -> Result<StatusCode, UpstreamError> {
        let res = self
            .client
            .get(self.url(endpoints::HEALTH))
            .timeout(self.timeout(CallWeight::Light))
            .send()
            .await
            .map_err(UpstreamError::unavailable("health check"))?;
        Ok(res.status())
    }

    /// POSTs a JSON payload and buffers the reply, whatever its status.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
        weight: CallWeight,
        operation: &'static str,
    ) -> Result<UpstreamReply, UpstreamError> {
        let res = self
            .client
            .post(self.url(endpoint))
            .timeout(self.timeout(weight))
            .json(payload)
            .send()
            .await
            .map_err(UpstreamError::unavailable(operation))?;

        read_reply(res, operation).await
    }

    /// Re-encodes an uploaded file as a fresh multipart body for ingestion.
    pub async fn ingest_file(
        &self,
        file_name: &str,
        contents: Bytes,
    ) -> Result<UpstreamReply, UpstreamError> {
        let length = contents.len() as u64;
        let part = Part::stream_with_length(contents, length)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| UpstreamError::Request(e.to_string()))?;
        let form = Form::new().percent_encode_noop().part("file", part);

        let res = self
            .client
            .post(self.url(endpoints::INGEST_FILE))
            .timeout(self.timeout(CallWeight::Medium))
            .multipart(form)
            .send()
            .await
            .map_err(UpstreamError::unavailable("file ingestion"))?;

        read_reply(res, "file ingestion").await
    }

    /// Sends an already-encoded JSON body to the embeddings endpoint.
    pub async fn embeddings(&self, body: Bytes) -> Result<UpstreamReply, UpstreamError> {
        let res = self
            .client
            .post(self.url(endpoints::EMBEDDINGS))
            .timeout(self.timeout(CallWeight::Medium))
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await
            .map_err(UpstreamError::unavailable("embeddings"))?;

        read_reply(res, "embeddings").await
    }

    /// Relays an arbitrary request to the same path on the upstream.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<UpstreamReply, UpstreamError> {
        let res = self
            .client
            .request(method, self.url(path_and_query))
            .timeout(self.timeout(CallWeight::Heavy))
            .headers(forwardable_request_headers(headers))
            .body(body)
            .send()
            .await
            .map_err(UpstreamError::unavailable("proxy"))?;

        read_reply(res, "proxy").await
    }
}

#[async_trait]
impl DocumentQaApi for UpstreamClient {
    async fn list_files(&self) -> Result<IngestedFileList, UpstreamError> {
        let res = self
            .client
            .get(self.url(endpoints::INGEST_LIST))
            .timeout(self.timeout(CallWeight::Light))
            .send()
            .await
            .map_err(UpstreamError::unavailable("file listing"))?;

        let reply = read_reply(res, "file listing").await?;
        if !reply.is_ok() {
            return Err(UpstreamError::Status {
                status: reply.status,
                body: reply.body,
            });
        }

        serde_json::from_slice(&reply.body).map_err(|e| UpstreamError::Parse(e.to_string()))
    }

    async fn delete_file(&self, doc_id: &str) -> Result<UpstreamReply, UpstreamError> {
        let res = self
            .client
            .delete(self.url(&endpoints::ingested_document(doc_id)))
            .timeout(self.timeout(CallWeight::Light))
            .send()
            .await
            .map_err(UpstreamError::unavailable("file deletion"))?;

        read_reply(res, "file deletion").await
    }
}

async fn read_reply(res: Response, operation: &'static str) -> Result<UpstreamReply, UpstreamError> {
    let status = res.status();
    let headers = res.headers().clone();
    let body = res
        .bytes()
        .await
        .map_err(UpstreamError::unavailable(operation))?;

    Ok(UpstreamReply {
        status,
        headers,
        body,
    })
}
