// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Merge request payload stored in an issue description.
//!
//! The payload is a block of `key: value` lines:
//!
//! ```text
//! branch: polecat/Nux/gt-xyz
//! target: integration/gastown
//! source_issue: gt-xyz
//! worker: Nux
//! rig: gastown
//! ```
//!
//! Keys are case-insensitive and `-` is accepted in place of `_`. Lines that
//! don't name a known key are ignored, so free-form text can sit around the
//! payload.

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// Fields extracted from a merge request's payload. Missing keys stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct MrFields {
    /// Branch proposed for merging.
    pub branch: String,
    /// Branch the work merges into (`main`, `integration/<epic>`).
    pub target: String,
    /// Work item the MR was created from.
    pub source_issue: String,
    /// Worker that produced the branch.
    pub worker: String,
    /// Rig the worker belongs to.
    pub rig: String,
    /// Commit produced by the merge, once merged.
    pub merge_commit: String,
    /// Why the MR was closed, once closed.
    pub close_reason: String,
}

impl MrFields {
    /// Render the fields as payload lines, skipping empty values.
    pub fn to_description(&self) -> String {
        let pairs = [
            ("branch", &self.branch),
            ("target", &self.target),
            ("source_issue", &self.source_issue),
            ("worker", &self.worker),
            ("rig", &self.rig),
            ("merge_commit", &self.merge_commit),
            ("close_reason", &self.close_reason),
        ];
        pairs
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn slot(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "branch" => Some(&mut self.branch),
            "target" => Some(&mut self.target),
            "source_issue" => Some(&mut self.source_issue),
            "worker" => Some(&mut self.worker),
            "rig" => Some(&mut self.rig),
            "merge_commit" => Some(&mut self.merge_commit),
            "close_reason" => Some(&mut self.close_reason),
            _ => None,
        }
    }
}

/// Extract merge request fields from an issue.
///
/// Returns `None` when the description carries no recognized key; that is not
/// an error, callers fall back to empty fields.
pub fn parse_mr_fields(issue: &Issue) -> Option<MrFields> {
    let description = issue.description.as_deref()?;
    let mut fields = MrFields::default();
    let mut found = false;

    for line in description.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase().replace('-', "_");
        if let Some(slot) = fields.slot(&key) {
            *slot = value.trim().to_string();
            found = true;
        }
    }

    found.then_some(fields)
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
