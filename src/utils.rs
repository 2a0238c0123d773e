//! Utility functions: time formatting and shutdown handling.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

/// Round a duration to the nearest whole second (halves round up).
pub fn round_to_secs(elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs();
    if elapsed.subsec_millis() >= 500 {
        secs + 1
    } else {
        secs
    }
}

/// Render elapsed time as a compact duration such as `3h2m1s`, `4m0s` or `7s`.
///
/// The input is rounded to whole seconds first. Leading zero units are
/// omitted; once a larger unit is printed every smaller unit follows it.
pub fn format_uptime(elapsed: Duration) -> String {
    let total = round_to_secs(elapsed);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Format a timestamp as RFC3339 in UTC with second precision.
pub fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current wall-clock time as RFC3339.
pub fn now_rfc3339() -> String {
    rfc3339(Utc::now())
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
