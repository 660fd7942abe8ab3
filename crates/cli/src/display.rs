// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering for queue tables and rejection reports.

use mq_core::{DisplayStatus, QueueEntry, RejectionResult};

use crate::colors::{self, codes};

const ID_WIDTH: usize = 12;
const STATUS_WIDTH: usize = 12;
const PRIORITY_WIDTH: usize = 4;
const BRANCH_WIDTH: usize = 28;
const WORKER_WIDTH: usize = 10;
const AGE_WIDTH: usize = 6;

/// Truncate to at most `max` characters.
pub fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate to `max` characters, marking the cut with `…`.
fn truncate_marked(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    format!("{}…", truncate(s, max.saturating_sub(1)))
}

fn align_left(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

/// Pad first, then color, so escape codes never count toward the width.
fn cell(text: &str, width: usize, code: Option<u8>, color: bool) -> String {
    let padded = align_left(text, width);
    match code {
        Some(code) if color => colors::paint(code, &padded),
        _ => padded,
    }
}

fn dim(text: &str, color: bool) -> String {
    if color {
        colors::paint(codes::DIM, text)
    } else {
        text.to_string()
    }
}

/// Label and color for a derived status. In-progress MRs read as `active`.
pub fn status_label(status: DisplayStatus) -> (&'static str, Option<u8>) {
    match status {
        DisplayStatus::Ready => ("ready", Some(codes::SUCCESS)),
        DisplayStatus::InProgress => ("active", Some(codes::WARNING)),
        DisplayStatus::Blocked => ("blocked", Some(codes::DIM)),
        DisplayStatus::Closed => ("closed", Some(codes::DIM)),
        DisplayStatus::Rejected => ("rejected", Some(codes::DIM)),
    }
}

/// Color for a priority: P0 and P1 are urgent, P2 is the default.
pub fn priority_color(priority: i64) -> Option<u8> {
    match priority {
        p if p <= 1 => Some(codes::ERROR),
        2 => Some(codes::WARNING),
        _ => None,
    }
}

/// Render the queue as a table, followed by one `waiting on` line per
/// blocked entry with a known blocker.
pub fn format_queue(rig: &str, entries: &[QueueEntry], color: bool) -> String {
    let mut out = format!("📋 Merge queue for '{rig}':\n\n");

    if entries.is_empty() {
        out.push_str(&format!("  {}\n", dim("(empty)", color)));
        return out;
    }

    let header = format!(
        "{} {} {} {} {} {:>width$}",
        align_left("ID", ID_WIDTH),
        align_left("STATUS", STATUS_WIDTH),
        align_left("PRI", PRIORITY_WIDTH),
        align_left("BRANCH", BRANCH_WIDTH),
        align_left("WORKER", WORKER_WIDTH),
        "AGE",
        width = AGE_WIDTH,
    );
    let header = if color { colors::header(&header) } else { header };
    out.push_str(&format!("  {header}\n"));

    for entry in entries {
        let (label, status_code) = status_label(entry.status);
        let priority = format!("P{}", entry.issue.priority);
        let age = dim(&format!("{:>width$}", entry.age, width = AGE_WIDTH), color);
        out.push_str(&format!(
            "  {} {} {} {} {} {}\n",
            align_left(truncate(&entry.issue.id, ID_WIDTH), ID_WIDTH),
            cell(label, STATUS_WIDTH, status_code, color),
            cell(
                &priority,
                PRIORITY_WIDTH,
                priority_color(entry.issue.priority),
                color
            ),
            align_left(&truncate_marked(&entry.fields.branch, BRANCH_WIDTH), BRANCH_WIDTH),
            align_left(&truncate_marked(&entry.fields.worker, WORKER_WIDTH), WORKER_WIDTH),
            age,
        ));
    }

    let waiting: Vec<String> = entries
        .iter()
        .filter_map(|entry| {
            let blocker = entry.waiting_on()?;
            let id = truncate(&entry.issue.id, ID_WIDTH);
            Some(format!(
                "  {} {}\n",
                dim(&format!("{id}:"), color),
                dim(&format!("waiting on {blocker}"), color)
            ))
        })
        .collect();
    if !waiting.is_empty() {
        out.push('\n');
        out.extend(waiting);
    }

    out
}

/// Render the outcome of a rejection.
///
/// `notify` is whether a notification was requested; the result records
/// whether it was actually delivered.
pub fn format_rejection(result: &RejectionResult, notify: bool, color: bool) -> String {
    let branch = if result.branch.is_empty() {
        result.mr_id.as_str()
    } else {
        result.branch.as_str()
    };
    let mut out = format!("✗ Rejected: {branch}\n");
    out.push_str(&format!("  Worker: {}\n", result.worker));
    out.push_str(&format!("  Reason: {}\n", result.reason));

    if !result.issue_id.is_empty() {
        out.push_str(&format!(
            "  Issue:  {} {}\n",
            result.issue_id,
            dim("(not closed - work not done)", color)
        ));
    }

    if notify {
        let line = if result.notified {
            "Worker notified via mail"
        } else {
            "Notification failed"
        };
        out.push_str(&format!("  {}\n", dim(line, color)));
    }

    out
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
