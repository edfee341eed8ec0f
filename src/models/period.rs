//! Filter periods and the filter state threaded through queries
//!
//! The filter state is owned by the caller and passed explicitly into every
//! filter and aggregation call; nothing here is global.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BudgetMateError, BudgetMateResult};

/// The date dimension of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// No date narrowing
    #[default]
    All,
    /// Today only
    Day,
    /// The current Monday-to-Sunday week
    Week,
    /// The selected month (see [`FilterState::month_offset`])
    Month,
    /// An explicit `from`/`to` range
    Range,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "day" | "today" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "range" => Ok(Self::Range),
            other => Err(PeriodParseError::InvalidPeriod(other.to_string())),
        }
    }
}

/// The category dimension of a filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact canonical category name
    Named(String),
}

impl CategoryFilter {
    /// Parse user input; "all" (any case) or blank selects every category
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(s.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => category == name,
        }
    }
}

/// Transient view selection: period, category, range bounds and month offset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub period: Period,
    pub category: CategoryFilter,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// 0 = current month, negative = months back; never positive
    month_offset: i32,
}

impl FilterState {
    /// A filter that selects everything in the current month context
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Select a date range; switches the period to [`Period::Range`]
    pub fn with_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.period = Period::Range;
        self.from = from;
        self.to = to;
        self
    }

    /// Select a month relative to the current one
    pub fn with_month_offset(mut self, offset: i32) -> BudgetMateResult<Self> {
        self.set_month_offset(offset)?;
        Ok(self)
    }

    pub fn month_offset(&self) -> i32 {
        self.month_offset
    }

    /// Set the month offset; forward navigation past the current month is an error
    pub fn set_month_offset(&mut self, offset: i32) -> BudgetMateResult<()> {
        if offset > 0 {
            return Err(BudgetMateError::InvalidMonthOffset(offset));
        }
        self.month_offset = offset;
        Ok(())
    }

    /// The period actually applied: a range without bounds behaves like "all"
    pub fn effective_period(&self) -> Period {
        if self.period == Period::Range && self.from.is_none() && self.to.is_none() {
            Period::All
        } else {
            self.period
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidPeriod(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidPeriod(s) => write!(
                f,
                "Invalid period '{}': expected all, day, week, month or range",
                s
            ),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period() {
        assert_eq!("month".parse::<Period>().unwrap(), Period::Month);
        assert_eq!("TODAY".parse::<Period>().unwrap(), Period::Day);
        assert!("year".parse::<Period>().is_err());
    }

    #[test]
    fn test_category_filter() {
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        let food = CategoryFilter::parse("Food");
        assert!(food.matches("Food"));
        assert!(!food.matches("food"));
    }

    #[test]
    fn test_month_offset_never_positive() {
        let mut filter = FilterState::new();
        assert!(filter.set_month_offset(1).is_err());
        assert_eq!(filter.month_offset(), 0);

        filter.set_month_offset(-2).unwrap();
        assert_eq!(filter.month_offset(), -2);
        assert!(filter.set_month_offset(3).is_err());
        assert_eq!(filter.month_offset(), -2);
    }

    #[test]
    fn test_empty_range_degrades_to_all() {
        let filter = FilterState::new().with_range(None, None);
        assert_eq!(filter.period, Period::Range);
        assert_eq!(filter.effective_period(), Period::All);

        let bounded = FilterState::new().with_range(NaiveDate::from_ymd_opt(2024, 1, 1), None);
        assert_eq!(bounded.effective_period(), Period::Range);
    }
}
