// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `mq schema`, help, and version output.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use yare::parameterized;

#[parameterized(
    list = { "list", "QueueListJson" },
    reject = { "reject", "RejectionResult" },
)]
fn schema_outputs_json(cmd: &str, title: &str) {
    let output = mq().args(["schema", cmd]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["title"], title);
}

#[test]
fn schema_needs_no_workspace() {
    let elsewhere = TempDir::new().unwrap();
    mq().current_dir(elsewhere.path())
        .args(["schema", "list"])
        .assert()
        .success();
}

#[test]
fn help_shows_quickstart() {
    mq().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Get started:"))
        .stdout(predicate::str::contains("queue"))
        .stdout(predicate::str::contains("schema"));
}

#[parameterized(
    list = { "list", "mq queue list gastown --ready" },
    reject = { "reject", "mq queue reject gastown mr-1" },
)]
fn subcommand_help_has_examples(cmd: &str, example: &str) {
    mq().args(["queue", cmd, "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Examples:"))
        .stdout(predicate::str::contains(example));
}

#[test]
fn version() {
    mq().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("mq "));
}
