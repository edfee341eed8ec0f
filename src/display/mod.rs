//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, categories and budgets for
//! terminal display. Reports render themselves via `format_terminal`.

pub mod budget;
pub mod category;
pub mod expense;
pub mod report;

pub use budget::format_budget_overview;
pub use category::{format_category_list, format_category_options, format_favorites};
pub use expense::{format_expense_table, format_filter_summary, period_label};
pub use report::format_series_chart;
