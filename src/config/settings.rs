//! User settings for BudgetMate
//!
//! Holds the budget thresholds and display preferences. Settings are created
//! lazily with defaults on first read and survive a data reset.

use serde::{Deserialize, Serialize};

use super::paths::BudgetMatePaths;
use crate::error::BudgetMateError;
use crate::models::Money;
use crate::storage::file_io::{read_json_or_default, write_json_atomic};

/// User settings for BudgetMate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Allowed spend per day
    #[serde(default)]
    pub daily_budget: Option<Money>,

    /// Allowed spend per month
    #[serde(default)]
    pub monthly_budget: Option<Money>,

    #[serde(default)]
    pub dark_mode: bool,

    /// Currency symbol shown after amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            daily_budget: None,
            monthly_budget: None,
            dark_mode: false,
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// The daily budget, if set to a positive amount
    pub fn daily(&self) -> Option<Money> {
        self.daily_budget.filter(Money::is_positive)
    }

    /// The monthly budget, if set to a positive amount
    pub fn monthly(&self) -> Option<Money> {
        self.monthly_budget.filter(Money::is_positive)
    }

    /// Whether any budget threshold is configured
    pub fn has_budget(&self) -> bool {
        self.daily().is_some() || self.monthly().is_some()
    }

    /// Limit for a span of `days` days inside one month
    ///
    /// The monthly budget wins when set; otherwise the daily budget is
    /// multiplied by the day count.
    pub fn limit_for_days(&self, days: u32) -> Option<Money> {
        self.monthly()
            .or_else(|| self.daily().map(|d| d.times(i64::from(days))))
    }

    /// Format an amount with the configured currency symbol
    pub fn format(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Load settings from disk, falling back to defaults when missing or corrupt
    pub fn load_or_create(paths: &BudgetMatePaths) -> Self {
        read_json_or_default(paths.settings_file())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetMatePaths) -> Result<(), BudgetMateError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
