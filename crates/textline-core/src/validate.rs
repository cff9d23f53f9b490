// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure predicates classifying inbound message content.
//!
//! Validation rejection is an expected branch of the conversation, not an
//! error: the engine re-prompts and makes no state change.

/// True for a non-negative integer with no decimal point, optionally
/// surrounded by whitespace. Equivalent to `^\s*\d+\s*$` plus an overflow
/// guard; `"0"` passes, a sign does not.
pub fn is_valid_quantity(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty()
        && trimmed.chars().all(|c| c.is_ascii_digit())
        && trimmed.parse::<i64>().is_ok()
}

/// Parse a validated quantity string. Returns `None` when
/// [`is_valid_quantity`] would reject the input.
pub fn parse_quantity(text: &str) -> Option<i64> {
    if is_valid_quantity(text) {
        text.trim().parse().ok()
    } else {
        None
    }
}

/// True for free text that is non-empty after trimming and at least
/// `min_len` characters long.
pub fn is_valid_text(text: &str, min_len: usize) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().count() >= min_len
}
