use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::ExpenseCategory;

/// Largest amount any single field may hold (one trillion). Five of these
/// summed and scaled to a percentage still fit comfortably in a `Decimal`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// One household's current-month snapshot. All amounts lie in `0..=MAX_AMOUNT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub income: Decimal,
    pub bills: Decimal,
    pub food: Decimal,
    pub transport: Decimal,
    pub subscriptions: Decimal,
    pub misc: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl BudgetRecord {
    /// All-zero record stamped with the current time.
    pub fn new() -> Self {
        Self::with_timestamp(Utc::now())
    }

    pub fn with_timestamp(updated_at: DateTime<Utc>) -> Self {
        Self {
            income: Decimal::ZERO,
            bills: Decimal::ZERO,
            food: Decimal::ZERO,
            transport: Decimal::ZERO,
            subscriptions: Decimal::ZERO,
            misc: Decimal::ZERO,
            updated_at,
        }
    }

    pub fn expense(&self, category: ExpenseCategory) -> Decimal {
        match category {
            ExpenseCategory::Bills => self.bills,
            ExpenseCategory::Food => self.food,
            ExpenseCategory::Transport => self.transport,
            ExpenseCategory::Subscriptions => self.subscriptions,
            ExpenseCategory::Misc => self.misc,
        }
    }

    pub fn get(&self, field: BudgetField) -> Decimal {
        match field {
            BudgetField::Income => self.income,
            BudgetField::Expense(category) => self.expense(category),
        }
    }

    /// Overwrite one amount. Does not touch `updated_at`.
    pub fn set(&mut self, field: BudgetField, value: Decimal) {
        let slot = match field {
            BudgetField::Income => &mut self.income,
            BudgetField::Expense(ExpenseCategory::Bills) => &mut self.bills,
            BudgetField::Expense(ExpenseCategory::Food) => &mut self.food,
            BudgetField::Expense(ExpenseCategory::Transport) => &mut self.transport,
            BudgetField::Expense(ExpenseCategory::Subscriptions) => &mut self.subscriptions,
            BudgetField::Expense(ExpenseCategory::Misc) => &mut self.misc,
        };
        *slot = value;
    }

    pub fn total_expenses(&self) -> Decimal {
        ExpenseCategory::all()
            .iter()
            .fold(Decimal::ZERO, |sum, c| sum.saturating_add(self.expense(*c)))
    }

    pub fn has_expenses(&self) -> bool {
        self.total_expenses() > Decimal::ZERO
    }

    /// True when every amount is non-negative and at most [`MAX_AMOUNT`].
    pub fn is_valid(&self) -> bool {
        BudgetField::all()
            .iter()
            .all(|f| (Decimal::ZERO..=MAX_AMOUNT).contains(&self.get(*f)))
    }
}

impl Default for BudgetRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// A writable amount on the record: income or one of the expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetField {
    Income,
    Expense(ExpenseCategory),
}

impl BudgetField {
    pub fn all() -> &'static [BudgetField] {
        &[
            Self::Income,
            Self::Expense(ExpenseCategory::Bills),
            Self::Expense(ExpenseCategory::Food),
            Self::Expense(ExpenseCategory::Transport),
            Self::Expense(ExpenseCategory::Subscriptions),
            Self::Expense(ExpenseCategory::Misc),
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense(category) => category.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Monthly Income",
            Self::Expense(category) => category.label(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Income => "💰",
            Self::Expense(category) => category.icon(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if lower == "income" {
            return Some(Self::Income);
        }
        ExpenseCategory::parse(&lower).map(Self::Expense)
    }
}

impl std::fmt::Display for BudgetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
