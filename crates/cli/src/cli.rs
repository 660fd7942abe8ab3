// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};
use mq_core::Status;

use crate::help;

/// Parse a raw issue status (`open`, `in_progress`, `closed`, `rejected`).
fn parse_status(s: &str) -> Result<Status, String> {
    s.parse::<Status>().map_err(|e| e.to_string())
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "mq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and triage the merge queue of a rig")]
#[command(
    long_about = "Inspect and triage the merge queue of a rig.\n\n\
    Merge requests are issues of type 'merge-request' whose description carries \
    branch, target, source_issue and worker fields."
)]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Inspect and triage a rig's merge queue
    #[command(subcommand)]
    Queue(QueueCommand),

    /// Output JSON Schema for command output
    #[command(subcommand)]
    Schema(SchemaCommand),
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// List merge requests in the queue
    #[command(after_help = help::list_examples())]
    List {
        /// Rig whose queue to show
        rig: String,

        /// Raw status to list (open, in_progress, closed, rejected) [default: open]
        #[arg(long, short, value_parser = parse_status)]
        status: Option<Status>,

        /// Only open MRs with no unresolved blockers (overrides --status)
        #[arg(long)]
        ready: bool,

        /// Only MRs from this worker (case-insensitive)
        #[arg(long, short)]
        worker: Option<String>,

        /// Only MRs targeting integration/<epic>
        #[arg(long, short)]
        epic: Option<String>,

        /// Only MRs with this priority (-1 for any)
        #[arg(
            long,
            short,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i64).range(-1..)
        )]
        priority: Option<i64>,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Reject a merge request, leaving its source issue open
    #[command(arg_required_else_help = true, after_help = help::reject_examples())]
    Reject {
        /// Rig the merge request belongs to
        rig: String,

        /// Merge request ID or branch name
        #[arg(value_name = "MR_ID_OR_BRANCH")]
        id_or_branch: String,

        /// Why the merge request is rejected
        #[arg(long, short)]
        reason: String,

        /// Mail the rejection to the worker
        #[arg(long)]
        notify: bool,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaCommand {
    /// Schema for `queue list -o json`
    List,
    /// Schema for `queue reject -o json`
    Reject,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
