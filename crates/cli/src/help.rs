// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles for help output.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let fg = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));

    Styles::styled()
        .header(fg(colors::codes::HEADER))
        .usage(fg(colors::codes::HEADER))
        .literal(fg(colors::codes::LITERAL))
        .placeholder(fg(colors::codes::CONTEXT))
        .valid(fg(colors::codes::CONTEXT))
        .error(fg(colors::codes::ERROR))
}

/// Quickstart shown after the options in the main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  mq queue list <rig>                     Show the merge queue
  mq queue list <rig> --ready             Show MRs ready to merge
  mq queue reject <rig> <id> -r \"why\"     Reject a merge request",
    )
}

/// Examples for `queue list`.
pub fn list_examples() -> String {
    colors::examples(
        "\
Examples:
  mq queue list gastown                   Open MRs, ready and blocked
  mq queue list gastown --ready           Only MRs with no open blockers
  mq queue list gastown -s in_progress    MRs currently being merged
  mq queue list gastown -w nux            MRs from one worker
  mq queue list gastown --epic auth       MRs targeting integration/auth
  mq queue list gastown -p 1 -o json      Priority 1 MRs as JSON",
    )
}

/// Examples for `queue reject`.
pub fn reject_examples() -> String {
    colors::examples(
        "\
Examples:
  mq queue reject gastown mr-1 -r \"tests fail\"             Reject by ID
  mq queue reject gastown polecat/nux/gt-1 -r \"stale\"      Reject by branch
  mq queue reject gastown mr-1 -r \"redo\" --notify          Also mail the worker",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
