use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{chat, embeddings, files, health, proxy, static_files, upload};
use crate::state::AppState;

/// Room for multipart framing on top of the file size limit.
const MULTIPART_OVERHEAD: usize = 1 << 20;

/// Builds the bridge router.
///
/// Named routes always win: the generic upstream proxy and static serving
/// run from the fallback, which only sees paths no named route matched.
pub fn router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.uploads.max_bytes.saturating_add(MULTIPART_OVERHEAD);
    // Chat bodies carry the whole history in rag mode.
    let json_limit = state.config.uploads.max_bytes;

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/chat",
            post(chat::chat).layer(DefaultBodyLimit::max(json_limit)),
        )
        .route("/api/files", get(files::list_files))
        .route("/api/files/", delete(files::delete_without_id))
        .route("/api/files/delete-all", delete(files::delete_all))
        .route("/api/files/:doc_id", delete(files::delete_file))
        .route("/api/processing-status", get(files::processing_status))
        .route("/api/clear-history", post(chat::clear_history))
        .route(
            "/api/embeddings",
            post(embeddings::embeddings).layer(DefaultBodyLimit::max(json_limit)),
        )
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(answer_options))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
}

async fn fallback(State(state): State<Arc<AppState>>, request: Request) -> Response {
    if proxy::is_proxied(request.uri().path()) {
        proxy::forward(&state, request).await
    } else {
        static_files::serve(&state, request).await
    }
}

/// Every OPTIONS request is answered here with an empty 200; the CORS layer
/// outside adds the headers.
async fn answer_options(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
}
