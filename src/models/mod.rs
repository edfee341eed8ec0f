//! Core data models for BudgetMate
//!
//! Expenses, the category suggestion index, money amounts, the date window
//! calculator and the caller-owned filter state.

pub mod calendar;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;

pub use calendar::{Calendar, WeekRange};
pub use category::CategoryList;
pub use expense::{Expense, ExpenseValidationError, DATE_FORMAT, UNCATEGORIZED};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use period::{CategoryFilter, FilterState, Period, PeriodParseError};
