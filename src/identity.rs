//! Process-wide application identity and the per-request info snapshot.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::utils::{format_uptime, rfc3339};

/// Application name reported by every endpoint.
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Application version reported by every endpoint.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Immutable metadata captured once at startup.
///
/// `started_at` is what we display; `started` is the monotonic twin used
/// for uptime so that wall-clock adjustments never make uptime go backwards.
#[derive(Debug, Clone)]
pub struct AppIdentity {
    name: String,
    version: String,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl AppIdentity {
    /// Create an identity whose start time is "now".
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    /// Identity of this build (package name and version).
    pub fn from_build() -> Self {
        Self::new(APP_NAME, APP_VERSION)
    }

    /// Application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Application version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Wall-clock start time.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Elapsed time since startup.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Uptime rendered like `3h2m1s`.
    pub fn uptime_string(&self) -> String {
        format_uptime(self.uptime())
    }

    /// Compute the derived info for a single request.
    pub fn snapshot(&self) -> InfoSnapshot {
        InfoSnapshot {
            name: self.name.clone(),
            version: self.version.clone(),
            rust_version: runtime_version(),
            platform: platform(),
            start_time: rfc3339(self.started_at),
            uptime: self.uptime_string(),
        }
    }
}

/// `/info` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoSnapshot {
    pub name: String,
    pub version: String,
    /// Compiler that built the binary.
    pub rust_version: String,
    /// `<os>/<arch>`, e.g. `linux/x86_64`.
    pub platform: String,
    pub start_time: String,
    pub uptime: String,
}

/// Version of the compiler that built this binary, captured by `build.rs`.
pub const RUSTC_VERSION: &str = env!("SAMPLE_APP_RUSTC_VERSION");

/// Runtime identifier, e.g. `rustc 1.83.0`.
pub fn runtime_version() -> String {
    format!("rustc {RUSTC_VERSION}")
}

/// Host platform as `<os>/<arch>`.
pub fn platform() -> String {
    format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH)
}
