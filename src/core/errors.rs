use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use axum::{response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("upstream unavailable: {message}: {details}")]
    UpstreamUnavailable { message: String, details: String },
    #[error("upstream response could not be parsed: {0}")]
    UpstreamParse(String),
    /// Non-success reply from the upstream, relayed without masking.
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: StatusCode, body: Bytes },
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            ApiError::UpstreamParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UpstreamStatus { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unavailable { operation, source } => ApiError::UpstreamUnavailable {
                message: format!("Upstream API error during {}", operation),
                details: source.to_string(),
            },
            UpstreamError::Request(details) => ApiError::UpstreamUnavailable {
                message: "Upstream request could not be built".to_string(),
                details,
            },
            UpstreamError::Status { status, body } => ApiError::UpstreamStatus { status, body },
            UpstreamError::Parse(details) => ApiError::UpstreamParse(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match self {
            ApiError::UpstreamStatus { body, .. } => {
                let mut response = (status, body).into_response();
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                return response;
            }
            ApiError::UpstreamUnavailable { message, details } => {
                json!({ "error": message, "details": details })
            }
            ApiError::UpstreamParse(details) => {
                json!({ "error": "Error parsing upstream response", "details": details })
            }
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => json!({ "error": msg }),
        };

        (status, Json(body)).into_response()
    }
}
