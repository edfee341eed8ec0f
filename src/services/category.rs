//! Category service
//!
//! Manages the category suggestion list: listing, rename with cascade to
//! expenses, removal from suggestions, and frequently used favorites.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::error::{BudgetMateError, BudgetMateResult};
use crate::models::{Calendar, CategoryList, Expense};
use crate::storage::RecordStore;

use super::filter::category_options;

/// Window, in days before today, that counts toward favorites
pub const FAVORITE_WINDOW_DAYS: u64 = 30;

/// Maximum number of favorites returned
pub const FAVORITE_LIMIT: usize = 7;

/// A frequently used category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub name: String,
    pub count: usize,
}

/// Outcome of a rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameResult {
    /// Canonical name the category ended up with
    pub name: String,
    /// Number of expenses re-tagged
    pub updated: usize,
}

/// Most used categories among expenses dated on or after `today - 30 days`
///
/// Sorted by use count, ties in first-seen order, at most seven entries.
pub fn favorite_categories(expenses: &[Expense], today: NaiveDate) -> Vec<Favorite> {
    let cutoff = today
        .checked_sub_days(Days::new(FAVORITE_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut favorites: Vec<Favorite> = Vec::new();
    for expense in expenses {
        let Some(date) = expense.parsed_date() else {
            continue;
        };
        let name = expense.category.trim();
        if date < cutoff || name.is_empty() {
            continue;
        }
        match index.get(name) {
            Some(&i) => favorites[i].count += 1,
            None => {
                index.insert(name, favorites.len());
                favorites.push(Favorite {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    favorites.sort_by(|a, b| b.count.cmp(&a.count));
    favorites.truncate(FAVORITE_LIMIT);
    favorites
}

/// Service for category management
pub struct CategoryService<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// The suggestion list, sorted
    pub fn list(&self) -> CategoryList {
        self.store.categories()
    }

    /// Distinct categories actually used by expenses, for filter pickers
    pub fn filter_options(&self) -> Vec<String> {
        category_options(&self.store.expenses())
    }

    /// Rename a category and re-tag every expense that uses it
    ///
    /// If the new name matches another category ignoring case, the two merge
    /// under that category's existing casing.
    pub fn rename(&self, old: &str, new: &str) -> BudgetMateResult<RenameResult> {
        let old = old.trim();
        let new = new.trim();
        if new.is_empty() {
            return Err(BudgetMateError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        let mut categories = self.store.categories();
        let mut expenses = self.store.expenses();
        // Accept any casing of a listed name
        let old = categories.find(old).unwrap_or(old).to_string();
        let old = old.as_str();
        let in_use = expenses.iter().any(|e| e.category.trim() == old);
        if !categories.contains(old) && !in_use {
            return Err(BudgetMateError::category_not_found(old));
        }

        let name = categories.rename(old, new);
        let mut updated = 0;
        for expense in expenses.iter_mut().filter(|e| e.category.trim() == old) {
            expense.category = name.clone();
            updated += 1;
        }

        self.store.put_categories(&categories)?;
        if updated > 0 {
            self.store.put_expenses(&expenses)?;
        }

        tracing::info!(old, new = %name, updated, "Renamed category");
        Ok(RenameResult { name, updated })
    }

    /// Remove a category from the suggestion list; expenses keep their category
    pub fn delete(&self, name: &str) -> BudgetMateResult<()> {
        let mut categories = self.store.categories();
        if !categories.remove(name.trim()) {
            return Err(BudgetMateError::category_not_found(name.trim()));
        }
        self.store.put_categories(&categories)?;
        tracing::info!(name = name.trim(), "Removed category from suggestions");
        Ok(())
    }

    /// Favorite categories as of the calendar's today
    pub fn favorites(&self, calendar: &Calendar) -> Vec<Favorite> {
        favorite_categories(&self.store.expenses(), calendar.today())
    }
}
