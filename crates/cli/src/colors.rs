// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for help and queue output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use crate::env;

/// ANSI 256-color codes.
pub mod codes {
    /// Section headers: pastel cyan/steel blue
    pub const HEADER: u8 = 74;
    /// Commands/literals: light grey
    pub const LITERAL: u8 = 250;
    /// Default values/context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Ready entries: soft green
    pub const SUCCESS: u8 = 114;
    /// Active entries and P2: amber
    pub const WARNING: u8 = 179;
    /// Urgent priorities: muted red
    pub const ERROR: u8 = 167;
    /// Blocked, closed, and secondary text: dark grey
    pub const DIM: u8 = 242;

    pub const RESET: &str = "\x1b[0m";
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Format a 256-color ANSI escape sequence for foreground color.
fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

/// Wrap `text` in the given color.
pub fn paint(code: u8, text: &str) -> String {
    format!("{}{}{}", fg256(code), text, codes::RESET)
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Colorize an examples help block.
///
/// Lines ending in `:` become headers. Example lines of the form
/// `  mq queue list <rig>    Description` get the command colored as a
/// literal with `<placeholders>` as context.
pub fn examples(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            if trimmed.ends_with(':') && !trimmed.contains("  ") {
                return format!("{indent}{}", header(trimmed));
            }
            match find_description_start(trimmed) {
                Some(end) => format!(
                    "{indent}{}{}",
                    colorize_command(&trimmed[..end]),
                    &trimmed[end..]
                ),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Color each word of a command as a literal, except `<placeholders>` and
/// `"quoted values"` which are colored as context.
pub fn colorize_command(cmd: &str) -> String {
    let mut in_quote = false;
    cmd.split(' ')
        .map(|word| {
            let quoted = in_quote || word.starts_with('"');
            if word.matches('"').count() % 2 == 1 {
                in_quote = !in_quote;
            }
            if word.is_empty() {
                String::new()
            } else if quoted || word.starts_with('<') {
                context(word)
            } else {
                literal(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find where the description starts (after 2+ spaces following the command).
pub fn find_description_start(line: &str) -> Option<usize> {
    let start = line.find("  ")?;
    let rest = &line[start..];
    if rest.trim().is_empty() {
        return None;
    }
    Some(start)
}

#[cfg(test)]
#[path = "colors_tests.rs"]
pub(crate) mod tests;
