#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── BudgetRecord ──────────────────────────────────────────────

#[test]
fn test_new_record_is_all_zero() {
    let record = BudgetRecord::new();
    for field in BudgetField::all() {
        assert_eq!(record.get(*field), Decimal::ZERO, "{field} should start at zero");
    }
    assert!(!record.has_expenses());
    assert!(record.is_valid());
}

#[test]
fn test_set_and_get_each_field() {
    let mut record = BudgetRecord::new();
    for (i, field) in BudgetField::all().iter().enumerate() {
        record.set(*field, Decimal::from(i as i64 + 1));
    }
    assert_eq!(record.income, dec!(1));
    assert_eq!(record.bills, dec!(2));
    assert_eq!(record.food, dec!(3));
    assert_eq!(record.transport, dec!(4));
    assert_eq!(record.subscriptions, dec!(5));
    assert_eq!(record.misc, dec!(6));
}

#[test]
fn test_set_does_not_touch_timestamp() {
    let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut record = BudgetRecord::with_timestamp(stamp);
    record.set(BudgetField::Income, dec!(2500));
    assert_eq!(record.updated_at, stamp);
}

#[test]
fn test_total_expenses_excludes_income() {
    let mut record = BudgetRecord::new();
    record.income = dec!(5000);
    record.bills = dec!(1200.50);
    record.food = dec!(300.25);
    record.misc = dec!(10);
    assert_eq!(record.total_expenses(), dec!(1510.75));
    assert!(record.has_expenses());
}

#[test]
fn test_negative_amount_is_invalid() {
    let mut record = BudgetRecord::new();
    record.food = dec!(-1);
    assert!(!record.is_valid());
}

#[test]
fn test_amount_above_ceiling_is_invalid() {
    let mut record = BudgetRecord::new();
    record.bills = MAX_AMOUNT;
    assert!(record.is_valid());
    record.bills = MAX_AMOUNT + dec!(0.01);
    assert!(!record.is_valid());
}

#[test]
fn test_total_expenses_saturates() {
    let mut record = BudgetRecord::new();
    record.bills = Decimal::MAX;
    record.food = Decimal::MAX;
    assert_eq!(record.total_expenses(), Decimal::MAX);
    assert!(!record.is_valid());
}

#[test]
fn test_record_json_uses_camel_case() {
    let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut record = BudgetRecord::with_timestamp(stamp);
    record.income = dec!(1000.50);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["income"], "1000.50");
    assert!(json.get("updatedAt").is_some());

    let back: BudgetRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}

// ── BudgetField ───────────────────────────────────────────────

#[test]
fn test_field_parse() {
    assert_eq!(BudgetField::parse("income"), Some(BudgetField::Income));
    assert_eq!(BudgetField::parse(" Food "), Some(BudgetField::Expense(ExpenseCategory::Food)));
    assert_eq!(
        BudgetField::parse("SUBSCRIPTIONS"),
        Some(BudgetField::Expense(ExpenseCategory::Subscriptions))
    );
    assert_eq!(BudgetField::parse("updatedAt"), None);
    assert_eq!(BudgetField::parse(""), None);
}

#[test]
fn test_field_roundtrip_through_key() {
    for field in BudgetField::all() {
        assert_eq!(BudgetField::parse(field.key()), Some(*field), "Roundtrip failed for {field}");
    }
}

#[test]
fn test_field_all_has_income_first() {
    let all = BudgetField::all();
    assert_eq!(all.len(), 6);
    assert_eq!(all[0], BudgetField::Income);
}

// ── ExpenseCategory ───────────────────────────────────────────

#[test]
fn test_category_labels() {
    assert_eq!(ExpenseCategory::Bills.label(), "Bills & Utilities");
    assert_eq!(ExpenseCategory::Food.label(), "Food & Groceries");
    assert_eq!(ExpenseCategory::Transport.label(), "Transportation");
    assert_eq!(ExpenseCategory::Subscriptions.label(), "Subscriptions");
    assert_eq!(ExpenseCategory::Misc.label(), "Miscellaneous");
}

#[test]
fn test_category_icons_are_distinct() {
    let icons: std::collections::HashSet<&str> =
        ExpenseCategory::all().iter().map(|c| c.icon()).collect();
    assert_eq!(icons.len(), 5);
}

#[test]
fn test_category_display_uses_label() {
    assert_eq!(format!("{}", ExpenseCategory::Food), "Food & Groceries");
}

// ── SyncStatus ────────────────────────────────────────────────

#[test]
fn test_sync_status_default_is_local() {
    assert_eq!(SyncStatus::default(), SyncStatus::Local);
}

#[test]
fn test_sync_status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&SyncStatus::Pending).unwrap(), "\"pending\"");
    let parsed: SyncStatus = serde_json::from_str("\"synced\"").unwrap();
    assert_eq!(parsed, SyncStatus::Synced);
}

#[test]
fn test_sync_status_badge() {
    assert_eq!(SyncStatus::Local.badge(), "Local Only");
    assert_eq!(SyncStatus::Pending.badge(), "Sync Pending");
    assert_eq!(SyncStatus::Synced.badge(), "Synced");
}
