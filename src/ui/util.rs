use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::models::MAX_AMOUNT;

static AMOUNT_INPUT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").ok());

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Whole-number percentage, e.g. `0.456` → `"46%"`.
pub(crate) fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate.saturating_mul(Decimal::ONE_HUNDRED).round())
}

/// Parse what the user typed into an amount field. Digits with at most one
/// decimal point are accepted; empty input (or a lone `.`) means zero.
/// Anything else, including a minus sign or an amount above
/// [`MAX_AMOUNT`], is rejected.
pub(crate) fn parse_amount_input(text: &str) -> Option<Decimal> {
    let text = text.trim();
    let valid = AMOUNT_INPUT.as_ref().is_some_and(|re| re.is_match(text));
    if !valid {
        return None;
    }
    let digits = text.strip_suffix('.').unwrap_or(text);
    if digits.is_empty() {
        return Some(Decimal::ZERO);
    }
    let value = if digits.starts_with('.') {
        Decimal::from_str(&format!("0{digits}")).ok()?
    } else {
        Decimal::from_str(digits).ok()?
    };
    (value <= MAX_AMOUNT).then_some(value)
}

/// "Never", "Just now", "12m ago", "3h ago".
pub(crate) fn format_last_sync(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last) = last else {
        return "Never".to_string();
    };
    let minutes = (now - last).num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else {
        format!("{}h ago", minutes / 60)
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

pub(crate) fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
