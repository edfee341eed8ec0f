//! Configuration module for BudgetMate
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgetMatePaths;
pub use settings::Settings;
