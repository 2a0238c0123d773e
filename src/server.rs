//! Listener binding and serving.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, ServiceError};

/// Address the service listens on for a given config (all interfaces).
pub fn listen_addr(config: &Config) -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], config.port))
}

/// Bind the listener. Failure here is fatal for the process.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let addr = listen_addr(config);
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServiceError::Bind { addr, source })
}

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("HTTP server listening on {}", addr);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServiceError::Serve)
}
