// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use chrono::{Duration, SecondsFormat, Utc};
use mq_core::{Database, Issue, MrFields};

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub const RIG: &str = "gastown";

/// The `mq` binary with color and environment overrides cleared.
pub fn mq() -> Command {
    let mut cmd = cargo_bin_cmd!("mq");
    cmd.env_remove("MQ_DIR")
        .env_remove("MQ_LOG")
        .env_remove("MQ_TIMINGS")
        .env_remove("COLOR")
        .env("NO_COLOR", "1");
    cmd
}

/// RFC 3339 timestamp `minutes` and a half in the past, so the rendered age
/// is stable for the duration of a test.
pub fn minutes_ago(minutes: i64) -> String {
    (Utc::now() - Duration::minutes(minutes) - Duration::seconds(30))
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A temp directory holding an `.mq/` workspace.
pub struct Workspace {
    pub temp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".mq")).unwrap();
        Workspace { temp }
    }

    pub fn work_dir(&self) -> PathBuf {
        self.temp.path().join(".mq")
    }

    /// Open (creating if needed) the default database of `rig`.
    pub fn rig(&self, rig: &str) -> Database {
        let path = self.work_dir().join("rigs").join(format!("{rig}.db"));
        Database::open(&path).unwrap().with_rig(rig)
    }

    /// `mq` running from the workspace root.
    pub fn mq(&self) -> Command {
        let mut cmd = mq();
        cmd.current_dir(self.temp.path());
        cmd
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.work_dir().join("config.toml"), content).unwrap();
    }
}

/// An open merge request for `source` from `worker`.
pub fn mr(id: &str, worker: &str, source: &str) -> Issue {
    let fields = MrFields {
        branch: format!("polecat/{worker}/{source}"),
        target: "main".into(),
        source_issue: source.into(),
        worker: worker.into(),
        ..Default::default()
    };
    Issue::merge_request(id, format!("Merge {source}")).with_description(fields.to_description())
}

/// Standard queue: two tasks, a ready MR from Nux and a blocked MR from Toast.
pub fn seeded() -> Workspace {
    let ws = Workspace::new();
    let db = ws.rig(RIG);
    db.create_issue(&Issue::new("gt-1", "task", "Work one"))
        .unwrap();
    db.create_issue(&Issue::new("gt-2", "task", "Work two"))
        .unwrap();
    db.create_issue(&mr("mr-1", "Nux", "gt-1").with_created_at(minutes_ago(5)))
        .unwrap();
    db.create_issue(&mr("mr-2", "Toast", "gt-2").with_created_at(minutes_ago(90)))
        .unwrap();
    db.add_blocker("mr-2", "gt-2").unwrap();
    ws
}
