// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Effective queue status derived from raw status and blocking signals.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::issue::{Issue, Status};

/// Status shown for a queue entry.
///
/// Open issues split into `Ready` and `Blocked`; every other raw status maps
/// through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Ready,
    Blocked,
    InProgress,
    Closed,
    Rejected,
}

impl DisplayStatus {
    /// Returns the string representation used in display and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Ready => "ready",
            DisplayStatus::Blocked => "blocked",
            DisplayStatus::InProgress => "in_progress",
            DisplayStatus::Closed => "closed",
            DisplayStatus::Rejected => "rejected",
        }
    }

    /// Only ready entries can be merged right now.
    pub fn is_actionable(&self) -> bool {
        matches!(self, DisplayStatus::Ready)
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derive the display status of an issue.
///
/// An open issue is blocked if either blocking signal is set: the store may
/// report a count without the list of blocker IDs.
pub fn derive_status(issue: &Issue) -> DisplayStatus {
    match issue.status {
        Status::Open if !issue.blocked_by.is_empty() || issue.blocked_by_count > 0 => {
            DisplayStatus::Blocked
        }
        Status::Open => DisplayStatus::Ready,
        Status::InProgress => DisplayStatus::InProgress,
        Status::Closed => DisplayStatus::Closed,
        Status::Rejected => DisplayStatus::Rejected,
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
