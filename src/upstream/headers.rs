use axum::http::header::{self, HeaderMap, HeaderName};

/// Connection-scoped headers that must not be relayed between hops.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Headers of an inbound request that may be sent on to the upstream.
///
/// `host` and `content-length` are dropped; the HTTP client fills both in
/// for the upstream connection.
pub fn forwardable_request_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name) || name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Appends upstream response headers onto `target`, skipping hop-by-hop
/// headers and `content-length` (the server recomputes it from the body).
pub fn copy_response_headers(source: &HeaderMap, target: &mut HeaderMap) {
    for (name, value) in source {
        if is_hop_by_hop(name) || name == header::CONTENT_LENGTH {
            continue;
        }
        target.append(name.clone(), value.clone());
    }
}
