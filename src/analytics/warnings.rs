use rust_decimal::Decimal;

use super::{compute_analytics, HEALTHY_BURN_RATE, HIGH_BURN_RATE};
use crate::models::{BudgetRecord, ExpenseCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Danger,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub severity: Severity,
    pub message: &'static str,
    pub category: Option<ExpenseCategory>,
}

impl Warning {
    fn new(severity: Severity, message: &'static str) -> Self {
        Self {
            severity,
            message,
            category: None,
        }
    }

    fn for_category(severity: Severity, message: &'static str, category: ExpenseCategory) -> Self {
        Self {
            severity,
            message,
            category: Some(category),
        }
    }
}

const FOOD_LIMIT_PERCENT: Decimal = Decimal::from_parts(40, 0, 0, false, 0);
const SUBSCRIPTIONS_LIMIT_PERCENT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Evaluate the advisory rules in their fixed order. Each rule contributes at
/// most one entry; an empty result means nothing fired.
pub fn compute_warnings(record: &BudgetRecord) -> Vec<Warning> {
    let analytics = compute_analytics(record);
    let percentages = &analytics.category_percentages;
    let mut warnings = Vec::new();

    if percentages.food > FOOD_LIMIT_PERCENT {
        warnings.push(Warning::for_category(
            Severity::Warning,
            "Your food spending is over 40% of income. Consider meal planning to reduce costs.",
            ExpenseCategory::Food,
        ));
    }

    if percentages.subscriptions > SUBSCRIPTIONS_LIMIT_PERCENT {
        warnings.push(Warning::for_category(
            Severity::Warning,
            "Subscriptions exceed 30% of income. Review and cancel unused services.",
            ExpenseCategory::Subscriptions,
        ));
    }

    if analytics.savings_potential < Decimal::ZERO {
        warnings.push(Warning::new(
            Severity::Danger,
            "Your expenses exceed your income! Review your budget urgently.",
        ));
    } else if analytics.burn_rate > HIGH_BURN_RATE {
        warnings.push(Warning::new(
            Severity::Warning,
            "You're spending over 90% of your income. Try to build an emergency fund.",
        ));
    }

    if analytics.savings_potential > Decimal::ZERO && analytics.burn_rate < HEALTHY_BURN_RATE {
        warnings.push(Warning::new(
            Severity::Info,
            "Great job! You're saving over 30% of your income.",
        ));
    }

    warnings
}
