//! Sample web service entry point.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sample_app::api::{create_router, AppState};
use sample_app::config::{Config, STATIC_DIR};
use sample_app::identity::AppIdentity;
use sample_app::server;
use sample_app::utils::shutdown_signal;

/// Sample web service for the apqx-platform GitOps stack.
#[derive(Parser, Debug)]
#[command(name = "sample-app")]
#[command(about = "Health, readiness, info and status endpoints for the platform demo")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// HTTP listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("sample_app=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Identity is captured before anything else so uptime covers startup.
    let identity = AppIdentity::from_build();

    let config = Config::load()
        .map_err(|e| {
            error!("Failed to load configuration: {}", e);
            e
        })?
        .with_port_override(args.port);

    info!(
        "Starting {} v{} on port {}",
        identity.name(),
        identity.version(),
        config.port
    );

    let listener = server::bind(&config).await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    let router = create_router(AppState::new(identity), STATIC_DIR);

    server::serve(listener, router, shutdown_signal())
        .await
        .map_err(|e| {
            error!("{}", e);
            e
        })?;

    info!("Server stopped");
    Ok(())
}
