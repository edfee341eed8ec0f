//! Filter flags shared by `list`, `export --rich` and `report categories`

use chrono::NaiveDate;
use clap::Args;

use crate::error::{BudgetMateError, BudgetMateResult};
use crate::models::{Calendar, CategoryFilter, FilterState, Period};

/// Period and category selection
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Period: all, day (today), week, month or range
    #[arg(short, long)]
    pub period: Option<Period>,

    /// Category name, or "all"
    #[arg(short, long)]
    pub category: Option<String>,

    /// Range start (YYYY-MM-DD); implies --period range
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD), inclusive; implies --period range
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Month relative to the current one (0 = current, -1 = previous, ...)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "month")]
    pub offset: Option<i32>,

    /// Month to show as YYYY-MM, instead of --offset
    #[arg(long)]
    pub month: Option<String>,
}

impl FilterArgs {
    /// Build the filter state these flags describe
    pub fn to_filter(&self, calendar: &Calendar) -> BudgetMateResult<FilterState> {
        let mut filter = FilterState::new();
        if let Some(category) = &self.category {
            filter = filter.with_category(CategoryFilter::parse(category));
        }

        let has_bounds = self.from.is_some() || self.to.is_some();
        match self.period {
            Some(Period::Range) | None if has_bounds => {
                filter = filter.with_range(self.from, self.to);
            }
            Some(period) if has_bounds => {
                return Err(BudgetMateError::Validation(format!(
                    "--from/--to cannot be combined with --period {}",
                    period
                )));
            }
            Some(period) => filter = filter.with_period(period),
            None => {}
        }

        filter.set_month_offset(self.month_offset(calendar)?)?;
        Ok(filter)
    }

    /// Selected month offset from `--offset` or `--month`
    pub fn month_offset(&self, calendar: &Calendar) -> BudgetMateResult<i32> {
        match (&self.month, self.offset) {
            (Some(month), _) => {
                let (year, month) = parse_year_month(month)?;
                calendar.month_offset_for(year, month)
            }
            (None, Some(offset)) => Ok(offset),
            (None, None) => Ok(0),
        }
    }
}

/// Parse `YYYY-MM`
pub fn parse_year_month(s: &str) -> BudgetMateResult<(i32, u32)> {
    let invalid = || {
        BudgetMateError::Validation(format!("Invalid month '{}'. Use YYYY-MM (e.g., 2024-03)", s))
    };
    let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}
