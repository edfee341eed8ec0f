//! Expense model
//!
//! An expense keeps its date as the ISO text it was entered or imported with.
//! An empty or unparsable date is legal and means "unset": such records count
//! toward "all" totals but never land in a day, week, month or range bucket.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// Date format used for every stored expense date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Category label used when an expense has a blank category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A single logged expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// ISO `YYYY-MM-DD` date, possibly empty
    #[serde(default)]
    pub date: String,

    /// Amount spent
    pub amount: Money,

    /// Canonical category name
    #[serde(default)]
    pub category: String,

    /// Free-text note
    #[serde(default)]
    pub note: String,
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(
        date: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            date: date.into(),
            amount,
            category: category.into(),
            note: note.into(),
        }
    }

    /// The date, if it parses as a calendar date
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Whether the record carries any date text at all
    pub fn has_date(&self) -> bool {
        !self.date.trim().is_empty()
    }

    /// `YYYY-MM` prefix of the date text
    pub fn month_key(&self) -> Option<&str> {
        let date = self.date.as_str();
        if date.len() >= 7 && date.is_char_boundary(7) {
            Some(&date[..7])
        } else {
            None
        }
    }

    /// Two-digit day label (`dd`) for a well-formed date
    pub fn day_label(&self) -> Option<&str> {
        self.parsed_date()?;
        self.date.get(8..10)
    }

    /// Day of month read from the `dd` position of the date text
    pub fn day_of_month(&self) -> Option<u32> {
        self.date.get(8..10)?.parse().ok()
    }

    /// Whether the date text starts with the given `YYYY-MM` key
    pub fn in_month(&self, month_key: &str) -> bool {
        self.has_date() && self.date.starts_with(month_key)
    }

    /// Category to show in aggregates, with blanks reported as "Uncategorized"
    pub fn category_label(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            UNCATEGORIZED
        } else {
            trimmed
        }
    }

    /// Validate a record entered by the user
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.has_date() {
            return Err(ExpenseValidationError::MissingDate);
        }
        if self.parsed_date().is_none() {
            return Err(ExpenseValidationError::InvalidDate(self.date.clone()));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::MissingCategory);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if !self.amount.in_range() {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = if self.has_date() { self.date.as_str() } else { "-" };
        write!(f, "{} {} {}", date, self.category_label(), self.amount)
    }
}

/// Sort expenses for presentation: ascending by date text, undated first
///
/// The sort is stable, so records sharing a date keep their relative order.
pub fn sort_by_date(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| a.date.cmp(&b.date));
}

/// Sum of all amounts
pub fn total(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Validation errors for user-entered expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    MissingDate,
    InvalidDate(String),
    MissingCategory,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDate => write!(f, "Please enter a date"),
            Self::InvalidDate(d) => write!(f, "Invalid date '{}', expected YYYY-MM-DD", d),
            Self::MissingCategory => write!(f, "Please enter a category"),
            Self::NonPositiveAmount(a) => write!(f, "Amount must be greater than zero (got {})", a),
            Self::AmountTooLarge(a) => {
                write!(f, "Amount {} exceeds the limit of {}", a, Money::MAX)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(date: &str, cents: i64, category: &str) -> Expense {
        Expense::new(date, Money::from_cents(cents), category, "")
    }

    #[test]
    fn test_date_helpers() {
        let e = expense("2024-03-15", 500, "Food");
        assert_eq!(e.parsed_date(), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(e.month_key(), Some("2024-03"));
        assert_eq!(e.day_label(), Some("15"));
        assert_eq!(e.day_of_month(), Some(15));
        assert!(e.in_month("2024-03"));
        assert!(!e.in_month("2024-04"));
    }

    #[test]
    fn test_unset_dates() {
        let empty = expense("", 500, "Food");
        assert!(!empty.has_date());
        assert_eq!(empty.parsed_date(), None);
        assert_eq!(empty.month_key(), None);
        assert_eq!(empty.day_label(), None);
        assert!(!empty.in_month(""));

        let partial = expense("2024-03", 500, "Food");
        assert!(partial.in_month("2024-03"));
        assert_eq!(partial.day_label(), None);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(expense("2024-03-01", 1, "  ").category_label(), "Uncategorized");
        assert_eq!(expense("2024-03-01", 1, " Food ").category_label(), "Food");
    }

    #[test]
    fn test_validate() {
        assert!(expense("2024-03-01", 100, "Food").validate().is_ok());
        assert_eq!(
            expense("", 100, "Food").validate(),
            Err(ExpenseValidationError::MissingDate)
        );
        assert!(matches!(
            expense("2024-13-01", 100, "Food").validate(),
            Err(ExpenseValidationError::InvalidDate(_))
        ));
        assert_eq!(
            expense("2024-03-01", 100, " ").validate(),
            Err(ExpenseValidationError::MissingCategory)
        );
        assert!(matches!(
            expense("2024-03-01", 0, "Food").validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));
        assert!(expense("2024-03-01", Money::MAX.cents(), "Food").validate().is_ok());
        assert!(matches!(
            expense("2024-03-01", Money::MAX.cents() + 1, "Food").validate(),
            Err(ExpenseValidationError::AmountTooLarge(_))
        ));
    }

    #[test]
    fn test_sort_by_date_puts_undated_first_and_is_stable() {
        let mut list = vec![
            Expense::new("2024-03-02", Money::from_cents(1), "A", "first"),
            Expense::new("", Money::from_cents(2), "B", ""),
            Expense::new("2024-03-01", Money::from_cents(3), "C", ""),
            Expense::new("2024-03-02", Money::from_cents(4), "D", "second"),
        ];
        sort_by_date(&mut list);
        let dates: Vec<_> = list.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["", "2024-03-01", "2024-03-02", "2024-03-02"]);
        assert_eq!(list[2].note, "first");
        assert_eq!(list[3].note, "second");
    }

    #[test]
    fn test_serialization_defaults() {
        let json = r#"{"id":"0190f3a2-0000-7000-8000-000000000000","amount":1050}"#;
        let e: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(e.date, "");
        assert_eq!(e.category, "");
        assert_eq!(e.amount, Money::from_cents(1050));
    }
}
