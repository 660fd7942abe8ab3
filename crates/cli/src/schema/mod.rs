// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Types for JSON output.
//!
//! Each command's `-o json` output is one of these types, so `mq schema`
//! describes exactly what the commands print.

pub mod list;
pub mod reject;
