// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! mqrs: command-line front end for the merge queue.
//!
//! Resolves a rig to its SQLite database through the `.mq/` workspace and
//! renders the queue logic from `mq_core`.
//!
//! # Example
//!
//! ```rust,ignore
//! use mqrs::{run, Command, OutputFormat, QueueCommand};
//!
//! run(Command::Queue(QueueCommand::List {
//!     rig: "gastown".to_string(),
//!     status: None,
//!     ready: true,
//!     worker: None,
//!     epic: None,
//!     priority: None,
//!     output: OutputFormat::Text,
//! }))?;
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod env;
pub mod help;
pub mod logging;
mod schema;
pub mod timings;

pub mod config;
pub mod error;

pub use cli::{Cli, Command, OutputFormat, QueueCommand, SchemaCommand};
pub use config::{find_work_dir, Config};
pub use error::{Error, Result};

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Queue(QueueCommand::List {
            rig,
            status,
            ready,
            worker,
            epic,
            priority,
            output,
        }) => commands::list::run(&rig, status, ready, worker, epic, priority, output),
        Command::Queue(QueueCommand::Reject {
            rig,
            id_or_branch,
            reason,
            notify,
            output,
        }) => commands::reject::run(&rig, id_or_branch, reason, notify, output),
        Command::Schema(cmd) => commands::schema::run(cmd),
    }
}
