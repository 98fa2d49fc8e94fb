#![allow(clippy::unwrap_used)]

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::util::*;

// ── parse_amount_input ────────────────────────────────────────

#[test]
fn test_parse_plain_numbers() {
    assert_eq!(parse_amount_input("1500"), Some(dec!(1500)));
    assert_eq!(parse_amount_input("12.34"), Some(dec!(12.34)));
    assert_eq!(parse_amount_input(" 42 "), Some(dec!(42)));
}

#[test]
fn test_parse_empty_coerces_to_zero() {
    assert_eq!(parse_amount_input(""), Some(Decimal::ZERO));
    assert_eq!(parse_amount_input("   "), Some(Decimal::ZERO));
    assert_eq!(parse_amount_input("."), Some(Decimal::ZERO));
}

#[test]
fn test_parse_partial_decimals() {
    assert_eq!(parse_amount_input("5."), Some(dec!(5)));
    assert_eq!(parse_amount_input(".5"), Some(dec!(0.5)));
}

#[test]
fn test_parse_rejects_negative_and_text() {
    assert_eq!(parse_amount_input("-5"), None);
    assert_eq!(parse_amount_input("abc"), None);
    assert_eq!(parse_amount_input("1.2.3"), None);
    assert_eq!(parse_amount_input("1,000"), None);
    assert_eq!(parse_amount_input("1e3"), None);
}

#[test]
fn test_parse_rejects_amounts_above_ceiling() {
    assert_eq!(parse_amount_input("1000000000000"), Some(dec!(1000000000000)));
    assert_eq!(parse_amount_input("1000000000000.01"), None);
    assert_eq!(parse_amount_input("79228162514264337593543950335"), None);
    assert_eq!(parse_amount_input("99999999999999999999999999999999"), None);
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
    assert_eq!(format_amount(dec!(999)), "$999.00");
    assert_eq!(format_amount(Decimal::ZERO), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-1200.5)), "-$1,200.50");
}

#[test]
fn test_format_amount_rounds_to_cents() {
    assert_eq!(format_amount(dec!(10.005)), "$10.00");
    assert_eq!(format_amount(dec!(10.015)), "$10.02");
}

// ── format_rate ───────────────────────────────────────────────

#[test]
fn test_format_rate() {
    assert_eq!(format_rate(dec!(0.4)), "40%");
    assert_eq!(format_rate(dec!(0.456)), "46%");
    assert_eq!(format_rate(Decimal::ZERO), "0%");
    assert_eq!(format_rate(dec!(1.2)), "120%");
}

#[test]
fn test_format_rate_saturates_huge_ratio() {
    assert_eq!(format_rate(dec!(1000000000000000000000000000)), format!("{}%", Decimal::MAX));
}

// ── format_last_sync ──────────────────────────────────────────

#[test]
fn test_last_sync_never() {
    assert_eq!(format_last_sync(None, Utc::now()), "Never");
}

#[test]
fn test_last_sync_relative() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(format_last_sync(Some(now - Duration::seconds(30)), now), "Just now");
    assert_eq!(format_last_sync(Some(now - Duration::minutes(12)), now), "12m ago");
    assert_eq!(format_last_sync(Some(now - Duration::minutes(59)), now), "59m ago");
    assert_eq!(format_last_sync(Some(now - Duration::minutes(185)), now), "3h ago");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Subscriptions", 8), "Subscri…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_bounds() {
    assert_eq!(progress_bar(0.0, 4), "[░░░░]");
    assert_eq!(progress_bar(0.5, 4), "[██░░]");
    assert_eq!(progress_bar(3.0, 4), "[████]");
}
