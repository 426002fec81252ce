// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry formatting.

use chrono::NaiveDateTime;

/// Render one entry block: `Jan 02, 19:50: message\n\n`.
///
/// Day, hour and minute are zero-padded; the month is abbreviated to its
/// first three letters. A blank line separates consecutive entries.
pub fn format_entry(at: NaiveDateTime, message: &str) -> String {
    format!("{}: {}\n\n", at.format("%b %d, %H:%M"), message)
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
