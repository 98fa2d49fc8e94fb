mod budget;
mod category;
mod sync;

pub use budget::{BudgetField, BudgetRecord, MAX_AMOUNT};
pub use category::ExpenseCategory;
pub use sync::SyncStatus;

#[cfg(test)]
mod tests;
