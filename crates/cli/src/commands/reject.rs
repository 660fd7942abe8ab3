// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use mq_core::queue;
use mq_core::{IssueStore, RejectRequest};

use crate::cli::OutputFormat;
use crate::colors;
use crate::display::format_rejection;
use crate::error::Result;

use super::open_rig;

pub fn run(
    rig: &str,
    id_or_branch: String,
    reason: String,
    notify: bool,
    format: OutputFormat,
) -> Result<()> {
    let request = RejectRequest::new(id_or_branch, reason, notify);
    // Validate before opening the rig so bad input never touches the store.
    request.validate()?;

    let mut db = open_rig(rig)?;
    let stdout = std::io::stdout();
    run_impl(
        &mut db,
        &request,
        format,
        colors::should_colorize(),
        &mut stdout.lock(),
    )
}

/// Internal implementation that accepts any store for testing.
pub(crate) fn run_impl<S, W>(
    store: &mut S,
    request: &RejectRequest,
    format: OutputFormat,
    color: bool,
    out: &mut W,
) -> Result<()>
where
    S: IssueStore + ?Sized,
    W: Write,
{
    let result = queue::reject(store, request)?;

    match format {
        OutputFormat::Text => {
            out.write_all(format_rejection(&result, request.notify, color).as_bytes())?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &result)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "reject_tests.rs"]
mod tests;
