//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod expense;
pub mod export;
pub mod filter;
pub mod import;
pub mod receipt;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{
    handle_add_command, handle_clear_command, handle_delete_command, handle_list_command,
    handle_reset_command, AddArgs, ListArgs,
};
pub use export::{handle_export_command, ExportArgs};
pub use filter::FilterArgs;
pub use import::handle_import_command;
pub use receipt::{handle_receipt_command, ReceiptArgs};
pub use report::{handle_report_command, ReportCommands};

use crate::models::Money;

/// clap value parser for amounts such as "12.50" or "12,50"
pub fn parse_amount(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}
