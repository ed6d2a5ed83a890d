//! Shared harness: a scripted document-QA upstream on a loopback port and
//! helpers to drive the bridge router without a listening socket.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{DefaultBodyLimit, Multipart, Path as UrlPath, State};
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use docqa_bridge::core::config::BridgeConfig;
use docqa_bridge::server::router::router;
use docqa_bridge::state::AppState;

/// Doc id the mock upstream refuses to delete.
pub const UNDELETABLE_DOC: &str = "bad";

type CallLog = Arc<Mutex<Vec<String>>>;

pub struct MockUpstream {
    pub url: String,
    calls: CallLog,
}

impl MockUpstream {
    /// `"METHOD /path?query"` for every request the upstream has seen.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log").clone()
    }
}

pub async fn spawn_mock_upstream() -> MockUpstream {
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/v1/chat/completions", post(echo_json))
        .route("/v1/completions", post(echo_json))
        .route("/v1/chunks", post(echo_json))
        .route("/v1/embeddings", post(echo_json))
        .route("/v1/ingest/list", get(ingest_list))
        .route("/v1/ingest/file", post(ingest_file))
        .route("/v1/ingest/:doc_id", delete(delete_doc))
        .fallback(passthrough)
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn_with_state(calls.clone(), record_call));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock upstream");
    let addr = listener.local_addr().expect("mock upstream addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream {
        url: format!("http://{}", addr),
        calls,
    }
}

/// A loopback URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe port");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn bridge(upstream_url: &str, static_dir: &Path) -> Router {
    bridge_with(upstream_url, static_dir, |_| {})
}

pub fn bridge_with(
    upstream_url: &str,
    static_dir: &Path,
    customize: impl FnOnce(&mut BridgeConfig),
) -> Router {
    let mut config = BridgeConfig::default();
    config.upstream.base_url = upstream_url.to_string();
    config.server.static_dir = static_dir.to_path_buf();
    config.logging.dir = None;
    customize(&mut config);

    router(AppState::initialize(config).expect("bridge state"))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub const BOUNDARY: &str = "bridge-test-boundary";

pub fn upload_request(file_name: &str, contents: &[u8]) -> Request<Body> {
    let mut body = Vec::with_capacity(contents.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .expect("request")
}

async fn record_call(State(calls): State<CallLog>, request: Request<Body>, next: Next) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    if let Ok(mut log) = calls.lock() {
        log.push(format!("{} {}", request.method(), target));
    }
    next.run(request).await
}

async fn echo_json(Json(payload): Json<Value>) -> Response {
    let mut response = Json(json!({ "received": payload })).into_response();
    response
        .headers_mut()
        .insert("x-upstream", HeaderValue::from_static("mock"));
    response
}

async fn ingest_list() -> Json<Value> {
    Json(json!({
        "object": "list",
        "model": "private-gpt",
        "data": [
            { "doc_id": "d1", "doc_metadata": { "file_name": "a.pdf" } },
            { "doc_id": "d3", "doc_metadata": { "file_name": "a.pdf" } },
            { "doc_id": UNDELETABLE_DOC, "doc_metadata": { "file_name": "bad.pdf" } }
        ]
    }))
}

async fn ingest_file(mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        return Json(json!({
            "object": "list",
            "data": [{ "doc_id": "new", "doc_metadata": { "file_name": file_name } }],
            "size": size
        }))
        .into_response();
    }
    StatusCode::UNPROCESSABLE_ENTITY.into_response()
}

async fn delete_doc(UrlPath(doc_id): UrlPath<String>) -> Response {
    if doc_id == UNDELETABLE_DOC {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "cannot delete" })),
        )
            .into_response();
    }
    StatusCode::OK.into_response()
}

async fn passthrough(request: Request<Body>) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let method = request.method().to_string();
    let mut response = (
        StatusCode::ACCEPTED,
        Json(json!({ "proxied": target, "method": method })),
    )
        .into_response();
    response
        .headers_mut()
        .insert("x-upstream", HeaderValue::from_static("mock"));
    response
}
