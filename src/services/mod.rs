//! Service layer for BudgetMate
//!
//! The service layer provides business logic on top of the record store,
//! handling validation, category canonicalization, and cross-entity
//! operations such as rename cascades.

pub mod budget;
pub mod category;
pub mod expense;
pub mod filter;
pub mod import;
pub mod receipt;

pub use budget::{BudgetKind, BudgetOverview, BudgetService};
pub use category::{favorite_categories, CategoryService, Favorite, RenameResult};
pub use expense::{ExpenseService, NewExpense, ResetScope};
pub use filter::{apply_filter, category_options};
pub use import::{parse_csv, ImportMode, ImportResult, ImportService, ParsedRow};
pub use receipt::{parse_receipt, ReceiptGuess};
