//! HTTP API handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use once_cell::sync::Lazy;
use serde::Serialize;

use super::templates::HomePage;
use crate::error::Result;
use crate::identity::AppIdentity;
use crate::utils::{now_rfc3339, rfc3339};

/// Endpoints advertised by `/api/status`, in order.
pub const STATUS_ENDPOINTS: [&str; 4] = ["/health", "/ready", "/info", "/api/status"];

/// Platform component labels advertised by `/api/status`.
pub static PLATFORM_COMPONENTS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("gitops", "argocd"),
        ("policies", "kyverno"),
        ("secrets", "sealed-secrets"),
        ("ingress", "traefik"),
        ("cluster", "k3d"),
        ("network", "tailscale"),
    ])
});

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Identity captured at startup; never mutated afterwards.
    pub identity: Arc<AppIdentity>,
}

impl AppState {
    /// Create new app state.
    pub fn new(identity: AppIdentity) -> Self {
        Self {
            identity: Arc::new(identity),
        }
    }
}

/// Health/readiness response.
#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    /// `healthy` or `ready`.
    pub status: &'static str,
    /// Current time (RFC3339).
    pub time: String,
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub application: String,
    pub endpoints: &'static [&'static str],
    pub platform: &'static BTreeMap<&'static str, &'static str>,
    pub status: &'static str,
    pub timestamp: String,
    pub version: String,
}

/// Encode `value` into a buffer before answering, so a serialization failure
/// turns into a 500 instead of a truncated 200.
pub fn json_response<T: Serialize>(value: &T) -> Result<Response> {
    let body = serde_json::to_vec(value)?;
    Ok((
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response())
}

/// Health check handler - always returns 200.
pub async fn health() -> Result<Response> {
    json_response(&ProbeResponse {
        status: "healthy",
        time: now_rfc3339(),
    })
}

/// Readiness check handler.
///
/// No dependencies are probed; once the listener accepts requests the
/// service reports ready.
pub async fn ready() -> Result<Response> {
    json_response(&ProbeResponse {
        status: "ready",
        time: now_rfc3339(),
    })
}

/// Home page handler.
pub async fn home(State(state): State<AppState>) -> Result<Response> {
    let identity = &state.identity;
    let started = rfc3339(identity.started_at());
    let uptime = identity.uptime_string();

    let page = HomePage {
        name: identity.name(),
        version: identity.version(),
        started: &started,
        uptime: &uptime,
    };

    Ok(Html(page.render()?).into_response())
}

/// Info handler - identity plus runtime details.
pub async fn info(State(state): State<AppState>) -> Result<Response> {
    json_response(&state.identity.snapshot())
}

/// Status handler - fixed API status document.
pub async fn status(State(state): State<AppState>) -> Result<Response> {
    let identity = &state.identity;
    json_response(&StatusResponse {
        application: identity.name().to_string(),
        endpoints: &STATUS_ENDPOINTS,
        platform: &*PLATFORM_COMPONENTS,
        status: "ok",
        timestamp: now_rfc3339(),
        version: identity.version().to_string(),
    })
}
