//! Figures derived from a [`BudgetRecord`]. Everything here is a pure function
//! of its input; nothing is cached.

mod warnings;

pub use warnings::{compute_warnings, Severity, Warning};

use rust_decimal::Decimal;

use crate::models::{BudgetRecord, ExpenseCategory};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;
/// 0.9
const HIGH_BURN_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 1);
/// 0.7
const HEALTHY_BURN_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSnapshot {
    pub total_expenses: Decimal,
    /// Fraction of income consumed by expenses; zero when there is no income.
    pub burn_rate: Decimal,
    /// Income minus expenses. Negative means a deficit.
    pub savings_potential: Decimal,
    /// Placeholder for a forecast; currently equal to `savings_potential`.
    pub month_end_prediction: Decimal,
    pub category_percentages: CategoryPercentages,
}

impl AnalyticsSnapshot {
    pub fn burn_level(&self) -> BurnLevel {
        BurnLevel::from_rate(self.burn_rate)
    }
}

/// Each expense category as a percentage of income (0..=100 and beyond).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryPercentages {
    pub bills: Decimal,
    pub food: Decimal,
    pub transport: Decimal,
    pub subscriptions: Decimal,
    pub misc: Decimal,
}

impl CategoryPercentages {
    pub fn get(&self, category: ExpenseCategory) -> Decimal {
        match category {
            ExpenseCategory::Bills => self.bills,
            ExpenseCategory::Food => self.food,
            ExpenseCategory::Transport => self.transport,
            ExpenseCategory::Subscriptions => self.subscriptions,
            ExpenseCategory::Misc => self.misc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnLevel {
    Healthy,
    High,
    Critical,
}

impl BurnLevel {
    pub fn from_rate(rate: Decimal) -> Self {
        if rate > HIGH_BURN_RATE {
            Self::Critical
        } else if rate > HEALTHY_BURN_RATE {
            Self::High
        } else {
            Self::Healthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for BurnLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn compute_analytics(record: &BudgetRecord) -> AnalyticsSnapshot {
    let total_expenses = record.total_expenses();
    let burn_rate = ratio(total_expenses, record.income);
    let savings_potential = record.income.saturating_sub(total_expenses);

    AnalyticsSnapshot {
        total_expenses,
        burn_rate,
        savings_potential,
        month_end_prediction: savings_potential,
        category_percentages: CategoryPercentages {
            bills: percent_of(record.bills, record.income),
            food: percent_of(record.food, record.income),
            transport: percent_of(record.transport, record.income),
            subscriptions: percent_of(record.subscriptions, record.income),
            misc: percent_of(record.misc, record.income),
        },
    }
}

/// Non-zero categories with their share of total expenses, in category order.
pub fn expense_breakdown(record: &BudgetRecord) -> Vec<(ExpenseCategory, Decimal, Decimal)> {
    let total = record.total_expenses();
    if total <= Decimal::ZERO {
        return Vec::new();
    }
    ExpenseCategory::all()
        .iter()
        .map(|c| (*c, record.expense(*c)))
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(c, amount)| (c, amount, percent_of(amount, total)))
        .collect()
}

/// `part / whole`, zero without a positive `whole`. A quotient too large for
/// `Decimal` (a tiny income against large expenses) saturates.
fn ratio(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part.checked_div(whole).unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    ratio(part, whole).saturating_mul(ONE_HUNDRED)
}

#[cfg(test)]
mod tests;
