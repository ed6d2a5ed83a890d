use axum::body::Body;
use axum::http::{header, HeaderValue};
use axum::response::Response;

use crate::upstream::headers::copy_response_headers;
use crate::upstream::UpstreamReply;

/// Relays an upstream reply as-is: status, filtered headers and body.
pub fn relay(reply: UpstreamReply) -> Response {
    let mut response = Response::new(Body::from(reply.body));
    *response.status_mut() = reply.status;
    copy_response_headers(&reply.headers, response.headers_mut());
    response
}

/// Relays status and body only, labelled as JSON.
pub fn relay_json(reply: UpstreamReply) -> Response {
    let mut response = Response::new(Body::from(reply.body));
    *response.status_mut() = reply.status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Bytes};
    use axum::http::{HeaderMap, StatusCode};

    fn reply(status: StatusCode) -> UpstreamReply {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/event-stream"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
        headers.insert("x-request-id", HeaderValue::from_static("abc"));
        UpstreamReply {
            status,
            headers,
            body: Bytes::from_static(b"data"),
        }
    }

    #[tokio::test]
    async fn relay_keeps_status_body_and_end_to_end_headers() {
        let response = relay(reply(StatusCode::UNPROCESSABLE_ENTITY));

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
        assert_eq!(response.headers()["x-request-id"], "abc");
        assert!(response.headers().get(header::CONNECTION).is_none());

        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert_eq!(&body[..], b"data");
    }

    #[test]
    fn relay_json_replaces_upstream_headers() {
        let response = relay_json(reply(StatusCode::OK));

        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert!(response.headers().get("x-request-id").is_none());
    }
}
