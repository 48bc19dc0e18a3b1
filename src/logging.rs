// src/logging.rs
//! Diagnostics for todo.
//!
//! Diagnostics go to stderr; stdout carries only user-facing output.

#![deny(missing_docs)]

use std::io;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "TODO_LOG";

/// Map `-v` count and `--quiet` to a filter directive.
pub fn directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "off";
    }
    match verbose {
        0 => "todo=warn",
        1 => "todo=info",
        2 => "todo=debug",
        _ => "todo=trace",
    }
}

/// Install the global subscriber. `TODO_LOG` wins over the flags.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(directive(verbose, quiet)));

    // a subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .try_init();
}
