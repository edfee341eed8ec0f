//! Yearly overview
//!
//! Twelve monthly totals for one calendar year, each compared with the
//! budget limit that applies to that month.

use serde::Serialize;

use crate::config::Settings;
use crate::display::report::{format_bar, separator};
use crate::models::calendar::{days_in_month, month_abbreviation, month_key, month_name};
use crate::models::money::decimal;
use crate::models::{Expense, Money};

use super::series::Series;
use super::verdict::BudgetStatus;

/// One month of the yearly overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearMonth {
    /// 1-based month number
    pub month: u32,
    /// Short month name ("Mar")
    pub label: String,
    #[serde(serialize_with = "decimal::serialize")]
    pub total: Money,
    /// Monthly budget, else daily budget times days in the month
    #[serde(serialize_with = "decimal::option::serialize")]
    pub limit: Option<Money>,
    /// `total - limit`; positive means over budget
    #[serde(serialize_with = "decimal::option::serialize")]
    pub diff: Option<Money>,
    pub status: BudgetStatus,
}

/// Month with the highest or lowest spend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthExtreme {
    /// Full month name ("March")
    pub name: String,
    #[serde(serialize_with = "decimal::serialize")]
    pub total: Money,
}

/// Yearly overview report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyReport {
    pub year: i32,
    pub months: Vec<YearMonth>,
    #[serde(serialize_with = "decimal::serialize")]
    pub total: Money,
    /// Total divided by twelve, empty months included
    #[serde(serialize_with = "decimal::serialize")]
    pub average: Money,
    pub highest: MonthExtreme,
    pub lowest: MonthExtreme,
}

impl YearlyReport {
    /// Build the overview for `year`
    ///
    /// Ties for highest and lowest go to the earliest month.
    pub fn generate(expenses: &[Expense], year: i32, settings: &Settings) -> Self {
        let mut months = Vec::with_capacity(12);
        let mut highest: Option<(u32, Money)> = None;
        let mut lowest: Option<(u32, Money)> = None;

        for month in 1..=12 {
            let key = month_key(year, month);
            let total: Money = expenses
                .iter()
                .filter(|e| e.in_month(&key))
                .map(|e| e.amount)
                .sum();

            if highest.map_or(true, |(_, max)| total > max) {
                highest = Some((month, total));
            }
            if lowest.map_or(true, |(_, min)| total < min) {
                lowest = Some((month, total));
            }

            let limit = settings.limit_for_days(days_in_month(year, month));
            months.push(YearMonth {
                month,
                label: month_abbreviation(month).to_string(),
                total,
                limit,
                diff: limit.map(|l| total - l),
                status: BudgetStatus::of(total, limit),
            });
        }

        let total: Money = months.iter().map(|m| m.total).sum();
        let extreme = |found: Option<(u32, Money)>| {
            let (month, total) = found.unwrap_or((1, Money::zero()));
            MonthExtreme {
                name: month_name(month).to_string(),
                total,
            }
        };

        tracing::debug!(year, total = %total, "Built yearly overview");

        Self {
            year,
            months,
            total,
            average: total.div_round(12),
            highest: extreme(highest),
            lowest: extreme(lowest),
        }
    }

    /// Monthly totals as a chart series
    pub fn series(&self) -> Series {
        Series {
            labels: self.months.iter().map(|m| m.label.clone()).collect(),
            values: self.months.iter().map(|m| m.total).collect(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        let max = self.months.iter().map(|m| m.total).max().unwrap_or_default();

        output.push_str(&format!("Yearly overview {}\n", self.year));
        output.push_str(&separator(60));
        output.push('\n');

        for month in &self.months {
            let bar = format_bar(month.total.as_f64(), max.as_f64(), 20);
            let verdict = match (month.status, month.diff) {
                (BudgetStatus::Over, Some(diff)) => {
                    format!("OVER by {}", diff.format_with_symbol(symbol))
                }
                (BudgetStatus::Under, Some(diff)) => {
                    format!("under by {}", diff.abs().format_with_symbol(symbol))
                }
                _ => String::new(),
            };
            output.push_str(&format!(
                "{:<4} {} {:>12} {}\n",
                month.label,
                bar,
                month.total.format_with_symbol(symbol),
                verdict
            ));
        }

        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!("Total:   {}\n", self.total.format_with_symbol(symbol)));
        output.push_str(&format!(
            "Average: {} per month\n",
            self.average.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Highest: {} ({})\n",
            self.highest.name,
            self.highest.total.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Lowest:  {} ({})\n",
            self.lowest.name,
            self.lowest.total.format_with_symbol(symbol)
        ));
        output
    }
}
