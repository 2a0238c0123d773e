//! HTTP API module: probes, info/status endpoints, home page and static files.

pub mod handlers;
pub mod routes;
pub mod templates;

pub use handlers::AppState;
pub use routes::create_router;
