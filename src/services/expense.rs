//! Expense service
//!
//! Entry point for creating, deleting and listing expenses. User input is
//! validated here once; everything downstream trusts the stored records.

use crate::error::{BudgetMateError, BudgetMateResult};
use crate::models::expense::sort_by_date;
use crate::models::{Calendar, CategoryList, Expense, ExpenseId, FilterState, Money};
use crate::storage::RecordStore;

use super::filter::apply_filter;

/// Input for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: String,
    pub amount: Money,
    pub category: String,
    pub note: String,
}

/// What a reset removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    /// Expenses and categories; settings survive
    Data,
    /// Expenses, categories and settings
    Everything,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Validate and store a new expense
    ///
    /// The category is canonicalized against the suggestion list, which
    /// learns any new name.
    pub fn add(&self, input: NewExpense) -> BudgetMateResult<Expense> {
        let mut expense = Expense::new(
            input.date.trim(),
            input.amount,
            input.category.trim(),
            input.note.trim(),
        );
        expense
            .validate()
            .map_err(|e| BudgetMateError::Validation(e.to_string()))?;

        let mut categories = self.store.categories();
        expense.category = categories.canonicalize(&expense.category);

        let mut expenses = self.store.expenses();
        expenses.push(expense.clone());
        self.store.put_expenses(&expenses)?;
        self.store.put_categories(&categories)?;

        tracing::info!(
            id = %expense.id,
            date = %expense.date,
            amount = %expense.amount,
            category = %expense.category,
            "Added expense"
        );
        Ok(expense)
    }

    /// Find an expense by full id or by its short form (as shown in listings)
    pub fn find(&self, identifier: &str) -> BudgetMateResult<Expense> {
        let expenses = self.store.expenses();
        let index = resolve(&expenses, identifier)?;
        Ok(expenses[index].clone())
    }

    /// Delete an expense by full id or short form
    pub fn delete(&self, identifier: &str) -> BudgetMateResult<Expense> {
        let mut expenses = self.store.expenses();
        let index = resolve(&expenses, identifier)?;
        let removed = expenses.remove(index);
        self.store.put_expenses(&expenses)?;

        tracing::info!(id = %removed.id, "Deleted expense");
        Ok(removed)
    }

    /// Delete every expense; categories and settings stay
    pub fn clear_all(&self) -> BudgetMateResult<usize> {
        let count = self.store.expenses().len();
        self.store.put_expenses(&[])?;
        tracing::info!(count, "Cleared all expenses");
        Ok(count)
    }

    /// Reset stored data
    pub fn reset(&self, scope: ResetScope) -> BudgetMateResult<()> {
        self.store.put_expenses(&[])?;
        self.store.put_categories(&CategoryList::new())?;
        if scope == ResetScope::Everything {
            self.store.put_settings(&Default::default())?;
        }
        tracing::info!(scope = ?scope, "Reset data");
        Ok(())
    }

    /// All expenses in stored order
    pub fn all(&self) -> Vec<Expense> {
        self.store.expenses()
    }

    /// Filtered expenses, sorted by date for presentation
    pub fn filtered(
        &self,
        filter: &FilterState,
        calendar: &Calendar,
    ) -> BudgetMateResult<Vec<Expense>> {
        let mut expenses = apply_filter(&self.store.expenses(), filter, calendar)?;
        sort_by_date(&mut expenses);
        Ok(expenses)
    }
}

fn resolve(expenses: &[Expense], identifier: &str) -> BudgetMateResult<usize> {
    let identifier = identifier.trim();
    if let Ok(id) = identifier.parse::<ExpenseId>() {
        return expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| BudgetMateError::expense_not_found(identifier));
    }

    let mut matches = expenses
        .iter()
        .enumerate()
        .filter(|(_, e)| e.id.matches_short(identifier));
    match (matches.next(), matches.next()) {
        (Some((index, _)), None) => Ok(index),
        (Some(_), Some(_)) => Err(BudgetMateError::Validation(format!(
            "Ambiguous expense id '{}'",
            identifier
        ))),
        (None, _) => Err(BudgetMateError::expense_not_found(identifier)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::Period;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn input(date: &str, units: i64, category: &str) -> NewExpense {
        NewExpense {
            date: date.to_string(),
            amount: Money::from_units(units),
            category: category.to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn test_first_seen_casing_wins_on_add() {
        let store = MemoryStore::new();
        let service = ExpenseService::new(&store);
        service.add(input("2024-03-01", 10, "food")).unwrap();
        let second = service.add(input("2024-03-02", 20, "Food")).unwrap();

        assert_eq!(second.category, "food");
        assert_eq!(store.categories().names(), &["food"]);
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let store = MemoryStore::new();
        let service = ExpenseService::new(&store);
        assert!(service.add(input("", 10, "Food")).unwrap_err().is_validation());
        assert!(service.add(input("2024-03-01", 0, "Food")).is_err());
        assert!(service.add(input("2024-03-01", 10, " ")).is_err());
        assert!(service.add(input("03/01/2024", 10, "Food")).is_err());
        assert!(service
            .add(input("2024-03-01", 900_000_000_000_000, "Food"))
            .unwrap_err()
            .is_validation());
        assert!(store.expenses().is_empty());
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_delete_by_full_and_short_id() {
        let store = MemoryStore::new();
        let service = ExpenseService::new(&store);
        let first = service.add(input("2024-03-01", 10, "Food")).unwrap();
        let second = service.add(input("2024-03-02", 20, "Food")).unwrap();

        service.delete(&first.id.to_string()).unwrap();
        assert_eq!(store.expenses(), vec![second.clone()]);

        assert!(service.delete(&first.id.to_string()).unwrap_err().is_not_found());
        service.delete(&second.id.short()).unwrap();
        assert!(store.expenses().is_empty());
    }

    #[test]
    fn test_clear_and_reset() {
        let store = MemoryStore::new();
        let service = ExpenseService::new(&store);
        service.add(input("2024-03-01", 10, "Food")).unwrap();
        store
            .put_settings(&Settings {
                dark_mode: true,
                ..Settings::default()
            })
            .unwrap();

        assert_eq!(service.clear_all().unwrap(), 1);
        assert_eq!(store.categories().len(), 1);

        service.reset(ResetScope::Data).unwrap();
        assert!(store.categories().is_empty());
        assert!(store.settings().dark_mode);

        service.reset(ResetScope::Everything).unwrap();
        assert_eq!(store.settings(), Settings::default());
    }

    #[test]
    fn test_filtered_is_sorted() {
        let store = MemoryStore::new();
        let service = ExpenseService::new(&store);
        service.add(input("2024-03-15", 5, "Transport")).unwrap();
        service.add(input("2024-03-01", 10, "Food")).unwrap();
        service.add(input("2024-02-01", 10, "Food")).unwrap();

        let calendar = Calendar::at(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        let filter = FilterState::new().with_period(Period::Month);
        let dates: Vec<_> = service
            .filtered(&filter, &calendar)
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-15"]);
    }
}
