// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::colors::tests::strip_ansi;

#[test]
fn quickstart_lists_both_commands() {
    let text = strip_ansi(&quickstart());
    assert!(text.starts_with("Get started:"));
    assert!(text.contains("mq queue list <rig>"));
    assert!(text.contains("mq queue reject <rig> <id>"));
}

#[test]
fn examples_keep_descriptions_aligned() {
    for text in [list_examples(), reject_examples()] {
        let plain = strip_ansi(&text);
        let columns: Vec<usize> = plain
            .lines()
            .skip(1)
            .filter_map(|line| {
                let trimmed = line.trim_start();
                crate::colors::find_description_start(trimmed)
                    .map(|start| start + trimmed[start..].len() - trimmed[start..].trim_start().len())
            })
            .collect();
        assert!(!columns.is_empty());
        assert!(columns.windows(2).all(|w| w[0] == w[1]), "{plain}");
    }
}
