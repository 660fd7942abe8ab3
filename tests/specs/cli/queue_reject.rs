// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `mq queue reject`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use mq_core::{Action, Status};

#[test]
fn rejects_by_id_and_leaves_source_open() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "reject", RIG, "mr-1", "--reason", "Tests fail"])
        .assert()
        .success()
        .stdout(
            "✗ Rejected: polecat/Nux/gt-1\n  Worker: Nux\n  Reason: Tests fail\n  \
             Issue:  gt-1 (not closed - work not done)\n",
        );

    let db = ws.rig(RIG);
    assert_eq!(db.get_issue("mr-1").unwrap().status, Status::Rejected);
    assert_eq!(db.get_issue("gt-1").unwrap().status, Status::Open);
    let events = db.get_events("mr-1").unwrap();
    let last = events.last().unwrap();
    assert_eq!(last.action, Action::Rejected);
    assert_eq!(last.reason.as_deref(), Some("Tests fail"));
}

#[test]
fn rejected_mr_leaves_the_open_queue() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "reject", RIG, "mr-1", "-r", "stale"])
        .assert()
        .success();
    ws.mq()
        .args(["queue", "list", RIG, "--status", "rejected"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"  mr-1 +rejected ").unwrap());
    ws.mq()
        .args(["queue", "list", RIG])
        .assert()
        .success()
        .stdout(predicate::str::contains("  mr-1 ").not());
}

#[test]
fn rejects_by_branch_with_notification() {
    let ws = seeded();
    ws.mq()
        .args([
            "queue",
            "reject",
            RIG,
            "polecat/Toast/gt-2",
            "-r",
            "Conflicts with main",
            "--notify",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("✗ Rejected: polecat/Toast/gt-2\n"))
        .stdout(predicate::str::ends_with("  Worker notified via mail\n"));

    let inbox = ws.rig(RIG).get_mail("gastown/polecats/Toast").unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].body.contains("Conflicts with main"));
}

#[test]
fn json_output() {
    let ws = seeded();
    let output = ws
        .mq()
        .args(["queue", "reject", RIG, "mr-1", "-r", "nope", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["mr_id"], "mr-1");
    assert_eq!(value["issue_id"], "gt-1");
    assert_eq!(value["notified"], false);
}

#[test]
fn empty_reason_fails_without_writing() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "reject", RIG, "mr-1", "--reason", "  "])
        .assert()
        .failure()
        .stderr("error: Reason cannot be empty\n");
    assert_eq!(ws.rig(RIG).get_issue("mr-1").unwrap().status, Status::Open);
}

#[test]
fn overlong_reason_fails() {
    let ws = seeded();
    let reason = "x".repeat(501);
    ws.mq()
        .args(["queue", "reject", RIG, "mr-1", "--reason", &reason])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reason too long (501 chars, max 500)"));
}

#[test]
fn missing_reason_is_usage_error() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "reject", RIG, "mr-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--reason"));
}

#[test]
fn unknown_mr() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "reject", RIG, "mr-404", "-r", "nope"])
        .assert()
        .failure()
        .stderr("error: rejecting MR: issue not found: mr-404\n");
}

#[test]
fn task_is_not_a_merge_request() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "reject", RIG, "gt-1", "-r", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a merge request"));
}

#[test]
fn second_rejection_fails() {
    let ws = seeded();
    ws.mq()
        .args(["queue", "reject", RIG, "mr-1", "-r", "first"])
        .assert()
        .success();
    ws.mq()
        .args(["queue", "reject", RIG, "mr-1", "-r", "second"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid status transition"));
}
