//! In-memory record store for tests and embedding

use std::sync::RwLock;

use crate::config::Settings;
use crate::error::{BudgetMateError, BudgetMateResult};
use crate::models::{CategoryList, Expense};

use super::RecordStore;

/// [`RecordStore`] backed by locked in-memory collections
#[derive(Debug, Default)]
pub struct MemoryStore {
    expenses: RwLock<Vec<Expense>>,
    categories: RwLock<CategoryList>,
    settings: RwLock<Settings>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with expenses and the categories they use
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        let categories = CategoryList::from_names(expenses.iter().map(|e| e.category.as_str()));
        Self {
            expenses: RwLock::new(expenses),
            categories: RwLock::new(categories),
            settings: RwLock::new(Settings::default()),
        }
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> BudgetMateError {
    BudgetMateError::Storage(format!("Failed to acquire write lock: {}", e))
}

impl RecordStore for MemoryStore {
    fn expenses(&self) -> Vec<Expense> {
        self.expenses
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn put_expenses(&self, expenses: &[Expense]) -> BudgetMateResult<()> {
        *self.expenses.write().map_err(poisoned)? = expenses.to_vec();
        Ok(())
    }

    fn categories(&self) -> CategoryList {
        self.categories
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn put_categories(&self, categories: &CategoryList) -> BudgetMateResult<()> {
        *self.categories.write().map_err(poisoned)? = categories.clone();
        Ok(())
    }

    fn settings(&self) -> Settings {
        self.settings
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn put_settings(&self, settings: &Settings) -> BudgetMateResult<()> {
        *self.settings.write().map_err(poisoned)? = settings.clone();
        Ok(())
    }
}
