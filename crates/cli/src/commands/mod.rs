// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod list;
pub mod reject;
pub mod schema;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use mq_core::Database;

use crate::config::{find_work_dir, resolve_rig_db, Config};
use crate::error::Result;

/// Open the database of `rig` in the current workspace.
pub fn open_rig(rig: &str) -> Result<Database> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let path = resolve_rig_db(&work_dir, &config, rig)?;
    let db = crate::time_phase!("db::open", { Database::open(&path)? });
    tracing::debug!(rig, path = %path.display(), "opened rig database");
    Ok(db.with_rig(rig))
}
