use axum::body::to_bytes;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};

use crate::core::errors::ApiError;
use crate::server::handlers::utils::relay;
use crate::state::AppState;

/// Path prefixes relayed verbatim to the upstream when no named route matched.
pub const PROXIED_PREFIXES: [&str; 2] = ["/v1/", "/api/"];

pub fn is_proxied(path: &str) -> bool {
    PROXIED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Reverse proxy: same method, path and query on the upstream.
pub async fn forward(state: &AppState, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let body = match to_bytes(body, state.config.uploads.max_bytes).await {
        Ok(body) => body,
        Err(err) => {
            return ApiError::bad_request(format!("Invalid request body: {}", err)).into_response()
        }
    };

    tracing::info!(
        method = %parts.method,
        target = %format!("{}{}", state.upstream.base_url(), path_and_query),
        "Proxying request"
    );

    match state
        .upstream
        .forward(parts.method.clone(), path_and_query, &parts.headers, body)
        .await
    {
        Ok(reply) => relay(reply),
        Err(err) => {
            tracing::warn!("Proxy error: {}", err);
            ApiError::UpstreamUnavailable {
                message: "Upstream API is not available".to_string(),
                details: err.to_string(),
            }
            .into_response()
        }
    }
}
