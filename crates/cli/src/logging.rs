// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to stderr.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::env;

/// Filter used when `MQ_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `MQ_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn filter() -> EnvFilter {
    env::log_filter()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once.
pub fn setup_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
