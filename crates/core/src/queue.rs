// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Merge queue view and the rejection transition.
//!
//! [`filter`] turns a store query into the queue a caller sees: a base query
//! (by status, or the store's dependency-free "ready" set) narrowed in memory
//! by worker and epic. Store ordering is preserved. [`reject`] validates a
//! rejection request and hands it to the store.

use chrono::{DateTime, Utc};

use crate::age::format_age;
use crate::error::{Error, Result};
use crate::fields::MrFields;
use crate::issue::{Issue, ListOptions, Status, MERGE_REQUEST_TYPE};
use crate::status::{derive_status, DisplayStatus};
use crate::store::{IssueStore, RejectionResult};

/// Integration branches are named `integration/<epic>`.
pub const INTEGRATION_BRANCH_PREFIX: &str = "integration/";

/// Priority value meaning "no priority filter".
pub const ANY_PRIORITY: i64 = -1;

/// Maximum accepted length of a rejection reason.
pub const MAX_REASON_LENGTH: usize = 500;

/// Name of the integration branch for an epic.
pub fn epic_branch(epic: &str) -> String {
    format!("{INTEGRATION_BRANCH_PREFIX}{epic}")
}

/// Which base query feeds the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Merge requests with this raw status.
    ByStatus(Status),
    /// Merge requests with no unresolved blockers.
    ReadyOnly,
}

impl Default for Selector {
    fn default() -> Self {
        Selector::ByStatus(Status::Open)
    }
}

/// Filter criteria for one queue listing. Built once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub selector: Selector,
    /// Exact priority; `None` leaves priority unfiltered.
    pub priority: Option<i64>,
    /// Worker name, compared case-insensitively.
    pub worker: Option<String>,
    /// Epic whose integration branch the MR must target.
    pub epic: Option<String>,
}

impl Criteria {
    pub fn new(selector: Selector) -> Self {
        Criteria {
            selector,
            ..Default::default()
        }
    }

    /// Set the priority filter; negative values (the [`ANY_PRIORITY`] sentinel) clear it.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = (priority > ANY_PRIORITY).then_some(priority);
        self
    }

    /// Set the worker filter; an empty name clears it.
    pub fn with_worker(mut self, worker: impl Into<String>) -> Self {
        self.worker = non_empty(worker.into());
        self
    }

    /// Set the epic filter; an empty name clears it.
    pub fn with_epic(mut self, epic: impl Into<String>) -> Self {
        self.epic = non_empty(epic.into());
        self
    }

    /// Base query sent to the store when not in ready mode.
    pub fn list_options(&self) -> ListOptions {
        let status = match self.selector {
            Selector::ByStatus(status) => Some(status),
            Selector::ReadyOnly => None,
        };
        ListOptions {
            issue_type: Some(MERGE_REQUEST_TYPE.to_string()),
            status,
            priority: self.priority,
        }
    }

    /// Apply the worker and epic filters to extracted fields.
    ///
    /// Absent fields compare as empty strings.
    pub fn matches_fields(&self, fields: Option<&MrFields>) -> bool {
        if let Some(worker) = &self.worker {
            let actual = fields.map(|f| f.worker.as_str()).unwrap_or("");
            if actual.to_lowercase() != worker.to_lowercase() {
                return false;
            }
        }
        if let Some(epic) = &self.epic {
            let actual = fields.map(|f| f.target.as_str()).unwrap_or("");
            if actual != epic_branch(epic) {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Fetch and filter the merge queue.
///
/// Store errors are returned with the failing query named. An empty queue is
/// `Ok(vec![])`.
pub fn filter<S: IssueStore + ?Sized>(store: &S, criteria: &Criteria) -> Result<Vec<Issue>> {
    let candidates = match criteria.selector {
        Selector::ReadyOnly => {
            let ready = store.ready().map_err(|e| e.context("querying ready MRs"))?;
            ready
                .into_iter()
                .filter(Issue::is_merge_request)
                .filter(|issue| criteria.priority.is_none_or(|p| issue.priority == p))
                .collect::<Vec<_>>()
        }
        Selector::ByStatus(_) => store
            .list(&criteria.list_options())
            .map_err(|e| e.context("querying merge queue"))?,
    };

    let total = candidates.len();
    let filtered: Vec<Issue> = candidates
        .into_iter()
        .filter(|issue| criteria.matches_fields(store.parse_mr_fields(issue).as_ref()))
        .collect();

    tracing::debug!(
        selector = ?criteria.selector,
        candidates = total,
        matched = filtered.len(),
        "filtered merge queue"
    );
    Ok(filtered)
}

/// A queue entry prepared for presentation.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub issue: Issue,
    pub fields: MrFields,
    pub status: DisplayStatus,
    pub age: String,
}

impl QueueEntry {
    /// First unresolved blocker, if the entry is blocked and blockers are known.
    pub fn waiting_on(&self) -> Option<&str> {
        match self.status {
            DisplayStatus::Blocked => self.issue.blocked_by.first().map(String::as_str),
            _ => None,
        }
    }
}

/// Pair each issue with its fields, derived status and age.
pub fn annotate<S: IssueStore + ?Sized>(
    store: &S,
    issues: Vec<Issue>,
    now: DateTime<Utc>,
) -> Vec<QueueEntry> {
    issues
        .into_iter()
        .map(|issue| QueueEntry {
            fields: store.parse_mr_fields(&issue).unwrap_or_default(),
            status: derive_status(&issue),
            age: format_age(&issue.created_at, now),
            issue,
        })
        .collect()
}

/// A request to reject one merge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectRequest {
    /// Issue ID or branch name of the MR.
    pub id_or_branch: String,
    pub reason: String,
    /// Send a mail notification to the MR's worker.
    pub notify: bool,
}

impl RejectRequest {
    pub fn new(
        id_or_branch: impl Into<String>,
        reason: impl Into<String>,
        notify: bool,
    ) -> Self {
        RejectRequest {
            id_or_branch: id_or_branch.into(),
            reason: reason.into(),
            notify,
        }
    }

    /// Check the request and return the trimmed reason.
    pub fn validate(&self) -> Result<&str> {
        if self.id_or_branch.trim().is_empty() {
            return Err(Error::FieldEmpty {
                field: "MR ID or branch",
            });
        }
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(Error::FieldEmpty { field: "Reason" });
        }
        let length = reason.chars().count();
        if length > MAX_REASON_LENGTH {
            return Err(Error::FieldTooLong {
                field: "Reason",
                actual: length,
                max: MAX_REASON_LENGTH,
            });
        }
        Ok(reason)
    }
}

/// Reject a merge request.
///
/// The request is validated before the store is touched. The source issue of
/// the MR is left open: the work it describes is still unfinished.
pub fn reject<S: IssueStore + ?Sized>(
    store: &mut S,
    request: &RejectRequest,
) -> Result<RejectionResult> {
    let reason = request.validate()?;
    let id_or_branch = request.id_or_branch.trim();

    let result = store
        .reject_mr(id_or_branch, reason, request.notify)
        .map_err(|e| e.context("rejecting MR"))?;

    tracing::info!(
        mr = %result.mr_id,
        branch = %result.branch,
        notified = result.notified,
        "rejected merge request"
    );
    Ok(result)
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
