// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for mq-core operations.

use thiserror::Error;

/// All possible errors that can occur in mq-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error("ambiguous merge request '{branch}' matches: {}", matches.join(", "))]
    AmbiguousMr {
        branch: String,
        matches: Vec<String>,
    },

    #[error("not a merge request: {id} has type '{issue_type}'")]
    NotMergeRequest { id: String, issue_type: String },

    #[error("invalid status transition: cannot go from {from} to {to}\n  hint: from '{from}' you can go to: {valid_targets}")]
    InvalidTransition {
        from: String,
        to: String,
        valid_targets: String,
    },

    #[error("cannot create self-dependency\n  hint: an issue cannot block itself")]
    SelfDependency,

    #[error("invalid status: '{0}'\n  hint: valid statuses are: open, in_progress, closed, rejected")]
    InvalidStatus(String),

    #[error("invalid action: '{0}'")]
    InvalidAction(String),

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("{field} too long ({actual} chars, max {max})")]
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("{context}: {source}")]
    Context {
        context: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupted data in database: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Wrap this error with a short description of the operation that failed.
    pub fn context(self, context: &'static str) -> Self {
        Error::Context {
            context,
            source: Box::new(self),
        }
    }

    /// Returns true for errors raised before any store interaction.
    pub fn is_validation(&self) -> bool {
        match self {
            Error::FieldEmpty { .. } | Error::FieldTooLong { .. } => true,
            Error::Context { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

/// A specialized Result type for mq-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
