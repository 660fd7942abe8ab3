// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mq-core: merge queue model and decision logic.
//!
//! This crate turns issue store records into a merge queue view and applies
//! the rejection transition. The CLI in `mq` is a thin shell over it.
//!
//! # Main Components
//!
//! - [`queue::filter`] / [`queue::annotate`] - build the queue view
//! - [`queue::reject`] - reject a merge request
//! - [`derive_status`], [`format_age`], [`parse_mr_fields`] - pure helpers
//! - [`IssueStore`] - the storage seam, implemented by [`Database`]

pub mod age;
pub mod db;
pub mod error;
pub mod fields;
pub mod issue;
pub mod mail;
pub mod queue;
pub mod status;
pub mod store;

pub use age::{format_age, UNKNOWN_AGE};
pub use db::Database;
pub use error::{Error, Result};
pub use fields::{parse_mr_fields, MrFields};
pub use issue::{Action, Event, Issue, ListOptions, Status, MERGE_REQUEST_TYPE};
pub use mail::Mail;
pub use queue::{Criteria, QueueEntry, RejectRequest, Selector};
pub use status::{derive_status, DisplayStatus};
pub use store::{IssueStore, RejectionResult};
