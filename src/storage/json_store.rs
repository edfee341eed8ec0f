//! JSON file record store
//!
//! Keeps expenses and categories under `data/` and settings next to them in
//! the base directory. Every write goes through an atomic temp-file rename.

use crate::config::{BudgetMatePaths, Settings};
use crate::error::BudgetMateResult;
use crate::models::{CategoryList, Expense};

use super::file_io::{read_json_or_default, write_json_atomic};
use super::RecordStore;

/// File-backed implementation of [`RecordStore`]
#[derive(Debug, Clone)]
pub struct JsonStore {
    paths: BudgetMatePaths,
}

impl JsonStore {
    /// Open a store, creating the directories if needed
    pub fn new(paths: BudgetMatePaths) -> BudgetMateResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &BudgetMatePaths {
        &self.paths
    }
}

impl RecordStore for JsonStore {
    fn expenses(&self) -> Vec<Expense> {
        let expenses: Vec<Expense> = read_json_or_default(self.paths.expenses_file());
        tracing::debug!(count = expenses.len(), "Loaded expenses");
        expenses
    }

    fn put_expenses(&self, expenses: &[Expense]) -> BudgetMateResult<()> {
        write_json_atomic(self.paths.expenses_file(), &expenses)
    }

    fn categories(&self) -> CategoryList {
        read_json_or_default(self.paths.categories_file())
    }

    fn put_categories(&self, categories: &CategoryList) -> BudgetMateResult<()> {
        write_json_atomic(self.paths.categories_file(), categories)
    }

    fn settings(&self) -> Settings {
        Settings::load_or_create(&self.paths)
    }

    fn put_settings(&self, settings: &Settings) -> BudgetMateResult<()> {
        settings.save(&self.paths)
    }
}
