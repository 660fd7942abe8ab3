// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Schema types for `mq queue list` JSON output.

use mq_core::{DisplayStatus, Issue, MrFields, QueueEntry};
use schemars::JsonSchema;
use serde::Serialize;

/// JSON output structure for the queue list command.
#[derive(JsonSchema, Serialize)]
pub struct QueueListJson {
    /// Rig whose queue was listed.
    pub rig: String,
    /// Matching merge requests in store order.
    pub entries: Vec<QueueEntryJson>,
}

/// One merge request with its derived presentation values.
#[derive(JsonSchema, Serialize)]
pub struct QueueEntryJson {
    #[serde(flatten)]
    pub issue: Issue,
    /// Effective status: `blocked` or `ready` for open MRs.
    pub display_status: DisplayStatus,
    /// Coarse age such as `5m`, or `?` if the timestamp is unreadable.
    pub age: String,
    /// Metadata parsed from the description; empty strings when absent.
    pub fields: MrFields,
}

impl From<QueueEntry> for QueueEntryJson {
    fn from(entry: QueueEntry) -> Self {
        QueueEntryJson {
            issue: entry.issue,
            display_status: entry.status,
            age: entry.age,
            fields: entry.fields,
        }
    }
}

impl QueueListJson {
    pub fn new(rig: &str, entries: Vec<QueueEntry>) -> Self {
        QueueListJson {
            rig: rig.to_string(),
            entries: entries.into_iter().map(QueueEntryJson::from).collect(),
        }
    }
}
