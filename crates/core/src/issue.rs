// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types for the merge queue.
//!
//! This module contains the records the issue store hands out: Issue, Status,
//! ListOptions, Action, and Event.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Issue type tag for merge requests. Every other type is ignored by the queue.
pub const MERGE_REQUEST_TYPE: &str = "merge-request";

/// Priority assigned to issues created without an explicit one.
pub const DEFAULT_PRIORITY: i64 = 2;

/// Raw workflow status of an issue as stored.
///
/// Use [`Status::can_transition_to`] to check valid transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Waiting in the queue. Initial state for new issues.
    Open,
    /// Currently being processed.
    InProgress,
    /// Finished (merged, or closed for another reason).
    Closed,
    /// Removed from the queue without merging.
    Rejected,
}

impl Status {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Closed => "closed",
            Status::Rejected => "rejected",
        }
    }

    /// Closed and rejected issues no longer take part in the queue.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Closed | Status::Rejected)
    }

    /// Check if a transition from this status to target is valid.
    pub fn can_transition_to(&self, target: Status) -> bool {
        matches!(
            (self, target),
            (Status::Open, Status::InProgress)
                | (Status::Open, Status::Rejected)
                | (Status::Open, Status::Closed)
                | (Status::InProgress, Status::Open)
                | (Status::InProgress, Status::Rejected)
                | (Status::InProgress, Status::Closed)
        )
    }

    /// Get valid transition targets as a formatted string
    pub fn valid_targets(&self) -> String {
        match self {
            Status::Open => "in_progress, rejected, closed".to_string(),
            Status::InProgress => "open, rejected, closed".to_string(),
            Status::Closed | Status::Rejected => "none (terminal)".to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "in_progress" => Ok(Status::InProgress),
            "closed" => Ok(Status::Closed),
            "rejected" => Ok(Status::Rejected),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A record tracked by the issue store.
///
/// Merge requests carry their branch metadata as `key: value` lines in the
/// description; see [`crate::fields::parse_mr_fields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Issue {
    /// Unique identifier.
    pub id: String,
    /// Category tag (e.g. `merge-request`, `task`).
    #[serde(rename = "type")]
    pub issue_type: String,
    /// Short description of the work.
    pub title: String,
    /// Longer description; holds the MR payload for merge requests.
    pub description: Option<String>,
    /// Raw workflow state.
    pub status: Status,
    /// Lower is more urgent.
    pub priority: i64,
    /// Person or queue this issue is assigned to.
    pub assignee: Option<String>,
    /// IDs of unresolved blocking issues, in the order they were recorded.
    #[serde(default)]
    pub blocked_by: Vec<String>,
    /// Number of unresolved blockers. May be set without `blocked_by`.
    #[serde(default)]
    pub blocked_by_count: usize,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last modification timestamp (RFC 3339).
    pub updated_at: String,
}

impl Issue {
    /// Construct an open issue with default priority, stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        issue_type: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        Issue {
            id: id.into(),
            issue_type: issue_type.into(),
            title: title.into(),
            description: None,
            status: Status::Open,
            priority: DEFAULT_PRIORITY,
            assignee: None,
            blocked_by: Vec::new(),
            blocked_by_count: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Construct an open merge request.
    pub fn merge_request(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, MERGE_REQUEST_TYPE, title)
    }

    /// Sets the description (builder pattern).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status (builder pattern).
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority (builder pattern).
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Sets both timestamps (builder pattern).
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        let created_at = created_at.into();
        self.updated_at = created_at.clone();
        self.created_at = created_at;
        self
    }

    /// Sets the blocker list and count together (builder pattern).
    pub fn with_blockers(mut self, blocked_by: Vec<String>) -> Self {
        self.blocked_by_count = blocked_by.len();
        self.blocked_by = blocked_by;
        self
    }

    /// Returns true if this issue is a merge request.
    pub fn is_merge_request(&self) -> bool {
        self.issue_type == MERGE_REQUEST_TYPE
    }
}

/// Base query options understood by the issue store.
///
/// `None` leaves a dimension unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub issue_type: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<i64>,
}

impl ListOptions {
    /// Options matching every merge request regardless of status or priority.
    pub fn merge_requests() -> Self {
        ListOptions {
            issue_type: Some(MERGE_REQUEST_TYPE.to_string()),
            ..Default::default()
        }
    }
}

/// Type of change recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Issue was created.
    Created,
    /// Issue status changed outside of a rejection.
    StatusChanged,
    /// Merge request was rejected.
    Rejected,
}

impl Action {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Created => "created",
            Action::StatusChanged => "status_changed",
            Action::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "created" => Ok(Action::Created),
            "status_changed" => Ok(Action::StatusChanged),
            "rejected" => Ok(Action::Rejected),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

/// An entry in the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Database-assigned identifier.
    pub id: i64,
    /// The issue this event belongs to.
    pub issue_id: String,
    /// What type of change occurred.
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    /// User-provided explanation (rejection reason).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// When the event occurred.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event with the current timestamp.
    pub fn new(issue_id: String, action: Action) -> Self {
        Event {
            id: 0, // Will be set by database
            issue_id,
            action,
            old_value: None,
            new_value: None,
            reason: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the old and new values for this event (builder pattern).
    pub fn with_values(mut self, old: Option<String>, new: Option<String>) -> Self {
        self.old_value = old;
        self.new_value = new;
        self
    }

    /// Sets the reason for this event (builder pattern).
    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
