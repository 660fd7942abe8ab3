// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The issue store seam.
//!
//! The queue logic only talks to storage through [`IssueStore`]. The SQLite
//! [`Database`](crate::Database) is the production implementation; tests use
//! in-memory doubles.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fields::{self, MrFields};
use crate::issue::{Issue, ListOptions};

/// Identity of a rejected merge request, returned for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RejectionResult {
    /// ID of the rejected merge request issue.
    pub mr_id: String,
    /// Branch the MR proposed.
    pub branch: String,
    /// Worker that produced the branch.
    pub worker: String,
    /// Source work item of the MR; empty when the MR has none. Left open.
    pub issue_id: String,
    /// Reason recorded with the rejection.
    pub reason: String,
    /// Whether the worker was notified.
    pub notified: bool,
}

/// Persistence operations the merge queue depends on.
pub trait IssueStore {
    /// Issues matching the base query, in store order.
    fn list(&self, options: &ListOptions) -> Result<Vec<Issue>>;

    /// Open issues of every type with no unresolved blockers, in store order.
    fn ready(&self) -> Result<Vec<Issue>>;

    /// Merge request fields of an issue, if it carries a payload.
    fn parse_mr_fields(&self, issue: &Issue) -> Option<MrFields> {
        fields::parse_mr_fields(issue)
    }

    /// Move the merge request identified by ID or branch to `rejected`.
    ///
    /// Only the MR issue is written; its source issue stays untouched.
    /// Notification is best effort and reported in the result.
    fn reject_mr(
        &mut self,
        id_or_branch: &str,
        reason: &str,
        notify: bool,
    ) -> Result<RejectionResult>;
}
