//! Export module for BudgetMate
//!
//! Two CSV flavours:
//! - Simple: `date,category,amount,note`, all expenses, readable by import
//! - Rich: semicolon-delimited with quoted fields, the filtered view

pub mod csv;

pub use self::csv::{export_rich_csv, export_simple_csv, RICH_HEADER};
