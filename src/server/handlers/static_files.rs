use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Serves a file from the static directory, or the index page for any path
/// that names no file so client-side routes still load the app.
pub async fn serve(state: &AppState, request: Request) -> Response {
    let server = &state.config.server;
    let service = ServeDir::new(&server.static_dir).fallback(ServeFile::new(server.index_path()));

    match service.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
