//! Helper functions and utilities
//!
//! This module contains common text helpers used throughout the application.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("valid leading integer pattern"));

/// Parse a day count the permissive way users type it.
///
/// The optional sign and digits at the start of the text are used, so
/// `"3 días"` yields 3. Text without leading digits yields 0 and values
/// outside the `i32` range saturate.
pub fn parse_day_count(text: &str) -> i32 {
    let Some(captures) = LEADING_INTEGER.captures(text) else {
        return 0;
    };
    let digits = &captures[1];

    match digits.parse::<i32>() {
        Ok(value) => value,
        Err(_) if digits.starts_with('-') => i32::MIN,
        Err(_) => i32::MAX,
    }
}

/// Whether the text is a plain integer with nothing around it but whitespace
pub fn is_plain_integer(text: &str) -> bool {
    text.trim().parse::<i64>().is_ok()
}

/// Normalize free-text menu answers for catalog lookups
pub fn normalize_choice(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
