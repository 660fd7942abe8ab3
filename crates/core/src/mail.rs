// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mail messages sent to workers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::MrFields;

/// A message in a rig's mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mail {
    /// Database-assigned identifier.
    pub id: i64,
    /// Address of the form `<rig>/polecats/<worker>`.
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Mailbox address of a worker in a rig.
pub fn worker_address(rig: &str, worker: &str) -> String {
    format!("{rig}/polecats/{worker}")
}

impl Mail {
    pub fn new(recipient: String, subject: String, body: String) -> Self {
        Mail {
            id: 0, // Will be set by database
            recipient,
            subject,
            body,
            created_at: Utc::now(),
        }
    }

    /// Compose the notice sent to a worker whose merge request was rejected.
    ///
    /// Returns `None` if the MR names no worker. The rig recorded on the MR
    /// takes precedence over `default_rig`.
    pub fn rejection(
        default_rig: &str,
        mr_id: &str,
        fields: &MrFields,
        reason: &str,
    ) -> Option<Self> {
        if fields.worker.is_empty() {
            return None;
        }
        let rig = if fields.rig.is_empty() {
            default_rig
        } else {
            fields.rig.as_str()
        };
        let branch = if fields.branch.is_empty() {
            mr_id
        } else {
            fields.branch.as_str()
        };
        let issue = if fields.source_issue.is_empty() {
            "(none)"
        } else {
            fields.source_issue.as_str()
        };

        let subject = format!("Merge request rejected: {branch}");
        let body = format!(
            "Your merge request has been rejected.\n\n\
             MR: {mr_id}\n\
             Branch: {branch}\n\
             Issue: {issue}\n\
             Reason: {reason}\n\n\
             The issue remains open. Please address the feedback and resubmit."
        );
        Some(Mail::new(worker_address(rig, &fields.worker), subject, body))
    }
}

#[cfg(test)]
#[path = "mail_tests.rs"]
mod tests;
