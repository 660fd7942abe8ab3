// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for workspace discovery and rig resolution.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use mq_core::{Database, Issue};

#[test]
fn finds_workspace_from_subdirectory() {
    let ws = seeded();
    let nested = ws.temp.path().join("src").join("deep");
    std::fs::create_dir_all(&nested).unwrap();

    ws.mq()
        .current_dir(&nested)
        .args(["queue", "list", RIG])
        .assert()
        .success()
        .stdout(predicate::str::contains("mr-1"));
}

#[test]
fn mq_dir_overrides_discovery() {
    let ws = seeded();
    let elsewhere = TempDir::new().unwrap();

    mq().current_dir(elsewhere.path())
        .env("MQ_DIR", ws.work_dir())
        .args(["queue", "list", RIG])
        .assert()
        .success()
        .stdout(predicate::str::contains("mr-1"));
}

#[test]
fn mq_dir_must_exist() {
    let elsewhere = TempDir::new().unwrap();
    mq().current_dir(elsewhere.path())
        .env("MQ_DIR", elsewhere.path().join("missing"))
        .args(["queue", "list", RIG])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: not initialized"));
}

#[test]
fn unknown_rig() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "list", "beads"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: rig not found: beads"));
}

#[test]
fn unknown_rig_reject_does_not_create_database() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "reject", "beads", "mr-1", "-r", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rig not found"));
    assert!(!ws.work_dir().join("rigs").join("beads.db").exists());
}

#[test]
fn rig_name_cannot_escape_workspace() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "list", "../gastown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid rig name"));
}

#[test]
fn configured_rig_database() {
    let ws = Workspace::new();
    let db = Database::open(&ws.work_dir().join("custom").join("beads.db")).unwrap();
    db.create_issue(&mr("bd-mr-1", "Slit", "bd-1")).unwrap();
    ws.write_config("[rigs.beads]\ndb = \"custom/beads.db\"\n");

    ws.mq()
        .args(["queue", "list", "beads"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("📋 Merge queue for 'beads':"))
        .stdout(predicate::str::contains("bd-mr-1"));
}

#[test]
fn configured_rig_notifies_in_its_own_rig() {
    let ws = Workspace::new();
    let path = ws.work_dir().join("custom").join("beads.db");
    Database::open(&path)
        .unwrap()
        .create_issue(&mr("bd-mr-1", "Slit", "bd-1"))
        .unwrap();
    ws.write_config("[rigs.beads]\ndb = \"custom/beads.db\"\n");

    ws.mq()
        .args(["queue", "reject", "beads", "bd-mr-1", "-r", "nope", "--notify"])
        .assert()
        .success();
    let inbox = Database::open(&path)
        .unwrap()
        .get_mail("beads/polecats/Slit")
        .unwrap();
    assert_eq!(inbox.len(), 1);
}

#[test]
fn malformed_config() {
    let ws = seeded();
    ws.write_config("[rigs.gastown\n");
    ws.mq()
        .args(["queue", "list", RIG])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: failed to parse config"));
}

#[test]
fn debug_logging_goes_to_stderr() {
    let ws = seeded();
    ws.mq()
        .env("MQ_LOG", "debug")
        .args(["queue", "list", RIG, "-o", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("opened rig database"));
}

#[test]
fn timings_go_to_stderr() {
    let ws = seeded();
    ws.mq()
        .env("MQ_TIMINGS", "1")
        .args(["queue", "list", RIG])
        .assert()
        .success()
        .stderr(predicate::str::contains("[timings] db::open"))
        .stderr(predicate::str::contains("[timings] queue::filter"));
}

#[test]
fn non_merge_request_issues_in_unconfigured_rig() {
    let ws = Workspace::new();
    ws.rig("empty")
        .create_issue(&Issue::new("e-1", "task", "Only a task"))
        .unwrap();
    ws.mq()
        .args(["queue", "list", "empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(empty)"));
}
