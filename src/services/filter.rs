//! Filter engine
//!
//! Narrows an expense snapshot by period first, then by category. The input
//! is never mutated; matching records are cloned into a new vector.

use std::collections::BTreeSet;

use chrono::NaiveTime;

use crate::error::BudgetMateResult;
use crate::models::calendar::end_of_day;
use crate::models::{Calendar, Expense, FilterState, Period};

/// Apply a filter to an expense snapshot
///
/// Result order follows the input order; use
/// [`sort_by_date`](crate::models::expense::sort_by_date) for presentation.
pub fn apply_filter(
    expenses: &[Expense],
    filter: &FilterState,
    calendar: &Calendar,
) -> BudgetMateResult<Vec<Expense>> {
    let period = PeriodMatcher::new(filter, calendar)?;
    let filtered: Vec<Expense> = expenses
        .iter()
        .filter(|e| period.matches(e) && filter.category.matches(&e.category))
        .cloned()
        .collect();

    tracing::debug!(
        period = %filter.effective_period(),
        input = expenses.len(),
        output = filtered.len(),
        "Applied filter"
    );
    Ok(filtered)
}

/// Distinct trimmed, non-empty categories present in the expenses, sorted
pub fn category_options(expenses: &[Expense]) -> Vec<String> {
    expenses
        .iter()
        .map(|e| e.category.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Period predicate with every window resolved up front
enum PeriodMatcher {
    All,
    Day(String),
    Week(crate::models::WeekRange),
    Month(String),
    Range {
        from: Option<chrono::NaiveDate>,
        to: Option<chrono::NaiveDateTime>,
    },
}

impl PeriodMatcher {
    fn new(filter: &FilterState, calendar: &Calendar) -> BudgetMateResult<Self> {
        Ok(match filter.effective_period() {
            Period::All => Self::All,
            Period::Day => Self::Day(calendar.today_key()),
            Period::Week => Self::Week(calendar.current_week_range()),
            Period::Month => Self::Month(calendar.selected_month_key(filter.month_offset())?),
            Period::Range => Self::Range {
                from: filter.from,
                to: filter.to.map(end_of_day),
            },
        })
    }

    fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::Day(today) => expense.date == *today,
            Self::Week(week) => expense.parsed_date().is_some_and(|d| week.contains(d)),
            Self::Month(key) => expense.in_month(key),
            Self::Range { from, to } => {
                let Some(date) = expense.parsed_date() else {
                    return false;
                };
                let at = date.and_time(NaiveTime::default());
                from.map_or(true, |f| date >= f) && to.map_or(true, |t| at <= t)
            }
        }
    }
}
