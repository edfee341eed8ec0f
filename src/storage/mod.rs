//! Storage layer for BudgetMate
//!
//! The [`RecordStore`] trait is the only persistence surface the services
//! see. Reads are total: missing or corrupt data yields an empty/default value
//! (logged at `warn`). Writes replace a whole collection and report failures.

pub mod file_io;
pub mod json_store;
pub mod memory;

pub use file_io::{read_json, read_json_or_default, write_json_atomic};
pub use json_store::JsonStore;
pub use memory::MemoryStore;

use crate::config::Settings;
use crate::error::BudgetMateResult;
use crate::models::{CategoryList, Expense};

/// Key-value style store for the three persisted collections
pub trait RecordStore {
    /// All expenses, in stored order
    fn expenses(&self) -> Vec<Expense>;

    /// Replace the stored expenses
    fn put_expenses(&self, expenses: &[Expense]) -> BudgetMateResult<()>;

    /// The category suggestion list
    fn categories(&self) -> CategoryList;

    /// Replace the stored category list
    fn put_categories(&self, categories: &CategoryList) -> BudgetMateResult<()>;

    /// Current settings, created with defaults when absent
    fn settings(&self) -> Settings;

    /// Replace the stored settings
    fn put_settings(&self, settings: &Settings) -> BudgetMateResult<()>;
}
