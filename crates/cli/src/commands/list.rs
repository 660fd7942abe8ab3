// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use chrono::{DateTime, Utc};
use mq_core::queue;
use mq_core::{Criteria, IssueStore, Selector, Status};

use crate::cli::OutputFormat;
use crate::colors;
use crate::display::format_queue;
use crate::error::Result;
use crate::schema::list::QueueListJson;

use super::open_rig;

/// Build filter criteria from command-line flags.
///
/// `--ready` selects the ready set; otherwise `--status` (default `open`)
/// selects by raw status. A priority of `-1` means any.
pub fn criteria(
    status: Option<Status>,
    ready: bool,
    worker: Option<String>,
    epic: Option<String>,
    priority: Option<i64>,
) -> Criteria {
    let selector = if ready {
        Selector::ReadyOnly
    } else {
        Selector::ByStatus(status.unwrap_or(Status::Open))
    };
    let mut criteria = Criteria::new(selector);
    if let Some(priority) = priority {
        criteria = criteria.with_priority(priority);
    }
    if let Some(worker) = worker {
        criteria = criteria.with_worker(worker);
    }
    if let Some(epic) = epic {
        criteria = criteria.with_epic(epic);
    }
    criteria
}

pub fn run(
    rig: &str,
    status: Option<Status>,
    ready: bool,
    worker: Option<String>,
    epic: Option<String>,
    priority: Option<i64>,
    format: OutputFormat,
) -> Result<()> {
    let db = open_rig(rig)?;
    let criteria = criteria(status, ready, worker, epic, priority);
    let stdout = std::io::stdout();
    run_impl(
        &db,
        rig,
        &criteria,
        format,
        Utc::now(),
        colors::should_colorize(),
        &mut stdout.lock(),
    )
}

/// Internal implementation that accepts any store for testing.
pub(crate) fn run_impl<S, W>(
    store: &S,
    rig: &str,
    criteria: &Criteria,
    format: OutputFormat,
    now: DateTime<Utc>,
    color: bool,
    out: &mut W,
) -> Result<()>
where
    S: IssueStore + ?Sized,
    W: Write,
{
    let issues = crate::time_phase!("queue::filter", { queue::filter(store, criteria)? });
    let entries = queue::annotate(store, issues, now);

    match format {
        OutputFormat::Text => {
            out.write_all(format_queue(rig, &entries, color).as_bytes())?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &QueueListJson::new(rig, entries))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
