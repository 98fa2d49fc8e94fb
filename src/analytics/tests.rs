#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{BudgetRecord, ExpenseCategory};

fn record(
    income: Decimal,
    bills: Decimal,
    food: Decimal,
    transport: Decimal,
    subscriptions: Decimal,
    misc: Decimal,
) -> BudgetRecord {
    let mut r = BudgetRecord::new();
    r.income = income;
    r.bills = bills;
    r.food = food;
    r.transport = transport;
    r.subscriptions = subscriptions;
    r.misc = misc;
    r
}

// ── compute_analytics ─────────────────────────────────────────

#[test]
fn test_zero_income_never_divides() {
    let r = record(dec!(0), dec!(100), dec!(50), dec!(25), dec!(10), dec!(5));
    let a = compute_analytics(&r);
    assert_eq!(a.burn_rate, Decimal::ZERO);
    for c in ExpenseCategory::all() {
        assert_eq!(a.category_percentages.get(*c), Decimal::ZERO, "{c} should be 0%");
    }
    assert_eq!(a.total_expenses, dec!(190));
    assert_eq!(a.savings_potential, dec!(-190));
}

#[test]
fn test_totals_and_identity_prediction() {
    let r = record(dec!(3000), dec!(1200.10), dec!(450.45), dec!(99.99), dec!(15), dec!(0.46));
    let a = compute_analytics(&r);
    assert_eq!(a.total_expenses, dec!(1766.00));
    assert_eq!(a.savings_potential, dec!(1234.00));
    assert_eq!(a.month_end_prediction, a.savings_potential);
}

#[test]
fn test_burn_rate_and_percentages() {
    let r = record(dec!(2000), dec!(200), dec!(300), dec!(100), dec!(100), dec!(100));
    let a = compute_analytics(&r);
    assert_eq!(a.total_expenses, dec!(800));
    assert_eq!(a.burn_rate, dec!(0.4));
    assert_eq!(a.savings_potential, dec!(1200));
    assert_eq!(a.category_percentages.food, dec!(15));
    assert_eq!(a.category_percentages.bills, dec!(10));
    assert_eq!(a.category_percentages.transport, dec!(5));
}

#[test]
fn test_deficit_is_negative_savings() {
    let r = record(dec!(1000), dec!(700), dec!(500), dec!(0), dec!(0), dec!(0));
    let a = compute_analytics(&r);
    assert_eq!(a.savings_potential, dec!(-200));
    assert_eq!(a.month_end_prediction, dec!(-200));
    assert_eq!(a.burn_rate, dec!(1.2));
}

#[test]
fn test_largest_accepted_amounts_do_not_overflow() {
    let max = crate::models::MAX_AMOUNT;
    let r = record(dec!(0.01), max, max, max, max, max);
    let a = compute_analytics(&r);
    assert_eq!(a.total_expenses, max * dec!(5));
    assert_eq!(a.burn_rate, dec!(500000000000000));
    assert_eq!(a.category_percentages.food, dec!(10000000000000000));
    assert_eq!(a.burn_level(), BurnLevel::Critical);
    assert_eq!(compute_warnings(&r).len(), 3);
}

#[test]
fn test_unrepresentable_ratio_saturates() {
    let r = record(
        dec!(0.0000000000000000000000000001),
        dec!(79228162514264337593543950335),
        dec!(79228162514264337593543950335),
        dec!(0),
        dec!(0),
        dec!(0),
    );
    let a = compute_analytics(&r);
    assert_eq!(a.total_expenses, Decimal::MAX);
    assert_eq!(a.burn_rate, Decimal::MAX);
    assert_eq!(a.category_percentages.bills, Decimal::MAX);
    assert!(a.savings_potential < Decimal::ZERO);
}

#[test]
fn test_analytics_is_idempotent() {
    let r = record(dec!(1234.56), dec!(321), dec!(99.5), dec!(12), dec!(7.77), dec!(0));
    assert_eq!(compute_analytics(&r), compute_analytics(&r));
}

// ── BurnLevel ─────────────────────────────────────────────────

#[test]
fn test_burn_level_thresholds() {
    assert_eq!(BurnLevel::from_rate(dec!(0)), BurnLevel::Healthy);
    assert_eq!(BurnLevel::from_rate(dec!(0.7)), BurnLevel::Healthy);
    assert_eq!(BurnLevel::from_rate(dec!(0.71)), BurnLevel::High);
    assert_eq!(BurnLevel::from_rate(dec!(0.9)), BurnLevel::High);
    assert_eq!(BurnLevel::from_rate(dec!(0.91)), BurnLevel::Critical);
}

// ── expense_breakdown ─────────────────────────────────────────

#[test]
fn test_breakdown_skips_zero_categories() {
    let r = record(dec!(0), dec!(300), dec!(0), dec!(100), dec!(0), dec!(0));
    let breakdown = expense_breakdown(&r);
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0], (ExpenseCategory::Bills, dec!(300), dec!(75)));
    assert_eq!(breakdown[1], (ExpenseCategory::Transport, dec!(100), dec!(25)));
}

#[test]
fn test_breakdown_empty_without_expenses() {
    let r = record(dec!(5000), dec!(0), dec!(0), dec!(0), dec!(0), dec!(0));
    assert!(expense_breakdown(&r).is_empty());
}

// ── compute_warnings ──────────────────────────────────────────

#[test]
fn test_no_income_no_expenses_no_warnings() {
    let r = record(dec!(0), dec!(0), dec!(0), dec!(0), dec!(0), dec!(0));
    assert!(compute_warnings(&r).is_empty());
}

#[test]
fn test_food_then_deficit_without_high_burn() {
    let r = record(dec!(1000), dec!(500), dec!(500), dec!(100), dec!(50), dec!(50));
    let warnings = compute_warnings(&r);
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].severity, Severity::Warning);
    assert_eq!(warnings[0].category, Some(ExpenseCategory::Food));
    assert!(warnings[0].message.contains("food"));
    assert_eq!(warnings[1].severity, Severity::Danger);
    assert_eq!(warnings[1].category, None);
    assert!(warnings[1].message.contains("exceed your income"));
}

#[test]
fn test_healthy_budget_gets_only_praise() {
    let r = record(dec!(2000), dec!(200), dec!(300), dec!(100), dec!(100), dec!(100));
    let warnings = compute_warnings(&r);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Info);
    assert_eq!(warnings[0].category, None);
}

#[test]
fn test_high_burn_without_deficit() {
    // 95% burn, no category over its threshold
    let r = record(dec!(1000), dec!(600), dec!(300), dec!(50), dec!(0), dec!(0));
    let warnings = compute_warnings(&r);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Warning);
    assert!(warnings[0].message.contains("90%"));
}

#[test]
fn test_exactly_balanced_budget() {
    // savings == 0: no deficit, burn 100% > 90%, no praise
    let r = record(dec!(1000), dec!(1000), dec!(0), dec!(0), dec!(0), dec!(0));
    let warnings = compute_warnings(&r);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("90%"));
}

#[test]
fn test_subscriptions_rule_with_praise() {
    let r = record(dec!(1000), dec!(0), dec!(0), dec!(0), dec!(310), dec!(0));
    let warnings = compute_warnings(&r);
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].category, Some(ExpenseCategory::Subscriptions));
    assert_eq!(warnings[1].severity, Severity::Info);
}

#[test]
fn test_thresholds_are_strict() {
    // food exactly 40%, subscriptions exactly 30%: neither fires
    let r = record(dec!(1000), dec!(0), dec!(400), dec!(0), dec!(300), dec!(0));
    let warnings = compute_warnings(&r);
    assert!(warnings.iter().all(|w| w.category.is_none()));
}

#[test]
fn test_all_rules_in_order() {
    let r = record(dec!(1000), dec!(0), dec!(450), dec!(0), dec!(350), dec!(300));
    let severities: Vec<Severity> = compute_warnings(&r).iter().map(|w| w.severity).collect();
    assert_eq!(
        severities,
        vec![Severity::Warning, Severity::Warning, Severity::Danger]
    );
}

#[test]
fn test_income_only_gets_praise() {
    let r = record(dec!(1000), dec!(0), dec!(0), dec!(0), dec!(0), dec!(0));
    let warnings = compute_warnings(&r);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Info);
}
