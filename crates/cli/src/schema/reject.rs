// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Schema types for `mq queue reject` JSON output.

pub use mq_core::RejectionResult as RejectOutputJson;
