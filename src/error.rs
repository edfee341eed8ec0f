//! Custom error types for BudgetMate
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for BudgetMate operations
#[derive(Error, Debug)]
pub enum BudgetMateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input, rejected before anything is stored
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A CSV import batch was rejected; `line` is 1-based with the header on line 1
    #[error("Import error in line {line}: {message}")]
    Import { line: usize, message: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Month navigation past the current month
    #[error("Invalid month offset {0}: only the current or past months can be selected")]
    InvalidMonthOffset(i32),
}

impl BudgetMateError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create an import error for a given line
    pub fn import(line: usize, message: impl Into<String>) -> Self {
        Self::Import {
            line,
            message: message.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BudgetMateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetMateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BudgetMateError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for BudgetMate operations
pub type BudgetMateResult<T> = Result<T, BudgetMateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetMateError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetMateError::expense_not_found("exp-1234");
        assert_eq!(err.to_string(), "Expense not found: exp-1234");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_import_error_reports_line() {
        let err = BudgetMateError::import(4, "invalid amount");
        assert_eq!(err.to_string(), "Import error in line 4: invalid amount");
    }

    #[test]
    fn test_month_offset_error() {
        let err = BudgetMateError::InvalidMonthOffset(2);
        assert!(err.to_string().contains("offset 2"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BudgetMateError = io_err.into();
        assert!(matches!(err, BudgetMateError::Io(_)));
    }
}
