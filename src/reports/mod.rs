//! Reports module for BudgetMate
//!
//! The aggregator and budget evaluator: pure functions from an expense
//! snapshot to series, verdicts and overviews. Each report also knows how to
//! render itself for the terminal.

pub mod monthly;
pub mod series;
pub mod verdict;
pub mod weekly;
pub mod yearly;

pub use monthly::{MonthChange, MonthReport, MonthSummary, Projection};
pub use series::{build_category, build_daily, build_trend, daily_statuses, Series};
pub use verdict::{
    ceiling, cumulative_to_date, period_verdict, remaining_this_month, BudgetStatus,
    CumulativeVerdict, Remaining, RemainingMethod, Verdict,
};
pub use weekly::{WeekTotal, WeeklyReport};
pub use yearly::{MonthExtreme, YearMonth, YearlyReport};
