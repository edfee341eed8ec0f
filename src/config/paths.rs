//! Path management for BudgetMate
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGETMATE_DATA_DIR` environment variable (if set)
//! 2. The platform data directory reported by `directories`
//!    (e.g. `~/.local/share/budgetmate` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BudgetMateError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BUDGETMATE_DATA_DIR";

const APP: (&str, &str, &str) = ("org", "BudgetMate", "budgetmate");

/// Manages all paths used by BudgetMate
#[derive(Debug, Clone)]
pub struct BudgetMatePaths {
    base_dir: PathBuf,
}

impl BudgetMatePaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no platform data directory can be determined.
    pub fn new() -> Result<Self, BudgetMateError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the record files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BudgetMateError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgetMateError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BudgetMateError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, BudgetMateError> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        BudgetMateError::Config("Could not determine platform-specific data dir".into())
    })?;
    Ok(proj.data_dir().to_path_buf())
}
