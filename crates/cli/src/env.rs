// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the `.mq` directory named by `MQ_DIR`, if set and non-empty.
pub fn work_dir() -> Option<PathBuf> {
    std::env::var(vars::MQ_DIR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Returns the tracing filter directive from `MQ_LOG`, if set.
pub fn log_filter() -> Option<String> {
    std::env::var(vars::MQ_LOG).ok().filter(|v| !v.is_empty())
}

/// Returns `true` if `MQ_TIMINGS` is set (any value).
pub fn mq_timings() -> bool {
    std::env::var(vars::MQ_TIMINGS).is_ok()
}

/// Returns `true` if `NO_COLOR=1`.
pub fn no_color() -> bool {
    std::env::var(vars::NO_COLOR).is_ok_and(|v| v == "1")
}

/// Returns `true` if `COLOR=1`.
pub fn force_color() -> bool {
    std::env::var(vars::COLOR).is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
