//! # Tracing Setup
//!
//! Initializes the tracing subscriber for the binary that hosts the engine.
//!
//! ## Log Levels
//! - RUST_LOG=debug: every store call with its plan/offset/limit
//! - RUST_LOG=info: lifecycle and mutation outcomes
//! - RUST_LOG=warn: clamped page requests, not-found mutations

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,brewery=debug,sqlx=warn";

/// Initializes the global tracing subscriber.
///
/// Safe to call more than once (tests, seed binary, host app): only the
/// first call installs a subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
