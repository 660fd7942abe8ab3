// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use thiserror::Error;

/// All possible errors that can occur in the mqrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: no .mq directory found\n  hint: create one, or point MQ_DIR at it")]
    NotInitialized,

    #[error("rig not found: {rig} (no database at {})\n  hint: add [rigs.{rig}] to .mq/config.toml", path.display())]
    RigNotFound { rig: String, path: PathBuf },

    #[error("invalid rig name: '{0}'\n  hint: rig names cannot be empty or contain path separators")]
    InvalidRig(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Core(#[from] mq_core::Error),
}

/// A specialized Result type for mqrs operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Core(mq_core::Error::Database(e))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
