// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `mq queue list`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use mq_core::Status;

fn list_json(ws: &Workspace, args: &[&str]) -> serde_json::Value {
    let output = ws
        .mq()
        .args(["queue", "list", RIG, "-o", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

fn ids(value: &serde_json::Value) -> Vec<String> {
    value["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Text output
// =============================================================================

#[test]
fn lists_open_queue_as_table() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "list", RIG])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("📋 Merge queue for 'gastown':\n\n"))
        .stdout(predicate::str::contains(
            "  ID           STATUS       PRI  BRANCH                       WORKER        AGE",
        ))
        .stdout(predicate::str::is_match(r"  mr-1 +ready +P2 +polecat/Nux/gt-1 +Nux +5m\n").unwrap())
        .stdout(predicate::str::is_match(r"  mr-2 +blocked +P2 +polecat/Toast/gt-2 +Toast +1h\n").unwrap())
        .stdout(predicate::str::ends_with("  mr-2: waiting on gt-2\n"));
}

#[test]
fn tasks_never_appear() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "list", RIG])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  gt-").not());
}

#[test]
fn empty_queue() {
    let ws = Workspace::new();
    ws.rig(RIG);
    ws.mq()
        .args(["queue", "list", RIG])
        .assert()
        .success()
        .stdout("📋 Merge queue for 'gastown':\n\n  (empty)\n");
}

#[test]
fn colors_when_forced() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "list", RIG])
        .env_remove("NO_COLOR")
        .env("COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[38;5;114mready"));
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn ready_excludes_blocked() {
    let ws = seeded();
    assert_eq!(ids(&list_json(&ws, &["--ready"])), vec!["mr-1"]);
}

#[test]
fn worker_filter_ignores_case() {
    let ws = seeded();
    assert_eq!(ids(&list_json(&ws, &["--worker", "TOAST"])), vec!["mr-2"]);
    assert!(ids(&list_json(&ws, &["--worker", "Toas"])).is_empty());
}

#[test]
fn epic_filter() {
    let ws = seeded();
    let db = ws.rig(RIG);
    let mut auth = mr("mr-3", "Nux", "gt-3");
    auth.description = Some(
        auth.description
            .unwrap()
            .replace("target: main", "target: integration/auth"),
    );
    db.create_issue(&auth).unwrap();

    assert_eq!(ids(&list_json(&ws, &["--epic", "auth"])), vec!["mr-3"]);
    assert!(ids(&list_json(&ws, &["--epic", "AUTH"])).is_empty());
}

#[test]
fn priority_filter_and_any_sentinel() {
    let ws = seeded();
    ws.rig(RIG)
        .create_issue(&mr("mr-3", "Nux", "gt-3").with_priority(0))
        .unwrap();

    assert_eq!(ids(&list_json(&ws, &["--priority", "0"])), vec!["mr-3"]);
    assert_eq!(
        ids(&list_json(&ws, &["--priority", "-1"])),
        vec!["mr-3", "mr-2", "mr-1"]
    );
}

#[test]
fn ready_with_priority_filter() {
    let ws = seeded();
    ws.rig(RIG)
        .create_issue(&mr("mr-3", "Nux", "gt-3").with_priority(1))
        .unwrap();
    assert_eq!(ids(&list_json(&ws, &["--ready", "-p", "1"])), vec!["mr-3"]);
}

#[test]
fn status_filter_shows_in_progress_as_active() {
    let ws = seeded();
    ws.rig(RIG)
        .update_issue_status("mr-1", Status::InProgress)
        .unwrap();

    assert_eq!(ids(&list_json(&ws, &["--status", "in_progress"])), vec!["mr-1"]);
    ws.mq()
        .args(["queue", "list", RIG, "--status", "in_progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("active"));
}

#[test]
fn ready_overrides_status() {
    let ws = seeded();
    assert_eq!(ids(&list_json(&ws, &["--ready", "--status", "closed"])), vec!["mr-1"]);
}

// =============================================================================
// JSON output
// =============================================================================

#[test]
fn json_entries() {
    let ws = seeded();
    let value = list_json(&ws, &[]);

    assert_eq!(value["rig"], "gastown");
    assert_eq!(ids(&value), vec!["mr-2", "mr-1"]);
    let blocked = &value["entries"][0];
    assert_eq!(blocked["type"], "merge-request");
    assert_eq!(blocked["status"], "open");
    assert_eq!(blocked["display_status"], "blocked");
    assert_eq!(blocked["blocked_by"][0], "gt-2");
    assert_eq!(blocked["fields"]["source_issue"], "gt-2");
    assert_eq!(value["entries"][1]["age"], "5m");
}
