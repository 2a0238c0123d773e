//! Sample web service for the apqx-platform GitOps stack.
//!
//! The service answers a handful of near-static endpoints:
//!
//! ```text
//! GET /            HTML home page (name, version, start time, uptime)
//! GET /health      {"status":"healthy","time":...}
//! GET /ready       {"status":"ready","time":...}
//! GET /info        name, version, runtime, platform, start time, uptime
//! GET /api/status  endpoint list and platform component labels
//! GET /static/*    files from ./static
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`identity`]: Application identity and per-request info snapshot
//! - [`api`]: HTTP handlers and router
//! - [`server`]: Listener binding and serving
//! - [`utils`]: Time formatting and shutdown signal

pub mod api;
pub mod config;
pub mod error;
pub mod identity;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
pub use identity::AppIdentity;
