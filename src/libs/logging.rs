//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with the shell's own output. `RUST_LOG`
//! takes precedence; otherwise `TASKMAN_DEBUG` turns on debug logs for this
//! crate and only warnings are shown without it.

use crate::libs::messages::macros::DEBUG_ENV;
use std::env;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";
pub const DEBUG_FILTER: &str = "taskman=debug,info";

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter() -> &'static str {
    if env::var_os(DEBUG_ENV).is_some() {
        DEBUG_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Installs the global subscriber. Calling it again is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
