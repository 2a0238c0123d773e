//! HTTP API route definitions.

use std::path::Path;

use axum::{
    http::{header, HeaderValue},
    middleware,
    response::Response,
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::{health, home, info, ready, status, AppState};

/// Mount point of the static file service.
pub const STATIC_PREFIX: &str = "/static";

/// Create the API router, serving `static_dir` under `/static/`.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Application endpoints
        .route("/", get(home))
        .route("/info", get(info))
        .route("/api/status", get(status))
        // Read-only static files
        .merge(static_files(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn static_files<S>(static_dir: impl AsRef<Path>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .nest_service(STATIC_PREFIX, ServeDir::new(static_dir))
        .layer(middleware::map_response(prefix_static_redirect))
}

/// `ServeDir` only sees the path below the mount point, so its
/// `/img` -> `/img/` directory redirect must be moved back under `/static`.
async fn prefix_static_redirect(mut response: Response) -> Response {
    if !response.status().is_redirection() {
        return response;
    }

    let rewritten = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .filter(|location| location.starts_with('/'))
        .map(|location| format!("{STATIC_PREFIX}{location}"))
        .and_then(|location| HeaderValue::from_str(&location).ok());

    if let Some(location) = rewritten {
        response.headers_mut().insert(header::LOCATION, location);
    }
    response
}
