//! BudgetMate - Personal expense tracking from the terminal
//!
//! This library provides the core functionality for the BudgetMate expense
//! tracker: recording expenses, filtering them by period and category,
//! aggregating them into chart series, and judging spending against a daily
//! or monthly budget.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money, categories, calendar)
//! - `storage`: Record store trait with JSON-file and in-memory backends
//! - `services`: Business logic layer (validation, filtering, import)
//! - `reports`: Aggregation and budget evaluation
//! - `export`: CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `budgetmate` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetmate::config::BudgetMatePaths;
//! use budgetmate::storage::JsonStore;
//!
//! let store = JsonStore::new(BudgetMatePaths::new()?)?;
//! let expenses = store.expenses();
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetMateError, BudgetMateResult};
