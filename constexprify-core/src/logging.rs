//! Structured logging using **tracing**.
//!
//! Analysis output (suggestions) goes to stdout; logs go to stderr as
//! JSON so observability tooling can consume them without interfering
//! with the diagnostic stream.

use tracing::{error, info, warn};

/// Initializes the global tracing collector (subscriber).
///
/// Call *once* at the start of the process. Configures structured JSON
/// output to stderr.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=constexprify=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr) // Keep stdout clean for suggestions
        .init();
}

/// Logs a warning event.
pub fn log_warn(message: &str) {
    warn!(detail = %message);
}

/// Logs an info event.
pub fn log_info(message: &str) {
    info!(detail = %message);
}

/// Logs an error event.
pub fn log_error(message: &str) {
    error!(detail = %message);
}
