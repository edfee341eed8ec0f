//! Chart-ready series
//!
//! Pure reducers from an expense subset to `{labels, values}` pairs. Sums are
//! accumulated in cents; nothing is rounded until display.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::config::Settings;
use crate::models::money::decimal;
use crate::models::{Expense, Money};

use super::verdict::BudgetStatus;

/// Number of months kept by [`build_trend`]
pub const TREND_MONTHS: usize = 6;

/// Labels with aligned values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    #[serde(serialize_with = "decimal::seq::serialize")]
    pub values: Vec<Money>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of all values
    pub fn total(&self) -> Money {
        self.values.iter().sum()
    }

    /// `(label, value)` pairs in order
    pub fn points(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Largest value, or zero for an empty series
    pub fn max_value(&self) -> Money {
        self.values.iter().copied().max().unwrap_or_default()
    }

    fn from_pairs<I: IntoIterator<Item = (String, Money)>>(pairs: I) -> Self {
        let (labels, values) = pairs.into_iter().unzip();
        Self { labels, values }
    }
}

/// Per-day sums keyed by the `dd` part of each date, labels ascending
///
/// Records without a valid date are skipped.
pub fn build_daily(expenses: &[Expense]) -> Series {
    let mut by_day: BTreeMap<String, Money> = BTreeMap::new();
    for expense in expenses {
        if let Some(day) = expense.day_label() {
            *by_day.entry(day.to_string()).or_default() += expense.amount;
        }
    }
    Series::from_pairs(by_day)
}

/// Status of each daily value against the daily budget
///
/// Without a daily budget every day is neutral.
pub fn daily_statuses(series: &Series, settings: &Settings) -> Vec<BudgetStatus> {
    let daily = settings.daily();
    series
        .values
        .iter()
        .map(|value| BudgetStatus::of(*value, daily))
        .collect()
}

/// Per-category sums in first-seen order
///
/// Blank categories are reported as "Uncategorized".
pub fn build_category(expenses: &[Expense]) -> Series {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut series = Series::default();
    for expense in expenses {
        let label = expense.category_label();
        match index.get(label) {
            Some(&i) => series.values[i] += expense.amount,
            None => {
                index.insert(label, series.labels.len());
                series.labels.push(label.to_string());
                series.values.push(expense.amount);
            }
        }
    }
    series
}

/// Per-month sums for the last six months present in the data
///
/// Months are `YYYY-MM` keys in ascending order. Gaps are not filled.
pub fn build_trend(expenses: &[Expense]) -> Series {
    let mut by_month: BTreeMap<&str, Money> = BTreeMap::new();
    for expense in expenses {
        if !expense.has_date() {
            continue;
        }
        if let Some(key) = expense.month_key() {
            *by_month.entry(key).or_default() += expense.amount;
        }
    }
    let skip = by_month.len().saturating_sub(TREND_MONTHS);
    Series::from_pairs(
        by_month
            .into_iter()
            .skip(skip)
            .map(|(key, value)| (key.to_string(), value)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expense::total;

    fn expense(date: &str, units: i64, category: &str) -> Expense {
        Expense::new(date, Money::from_units(units), category, "")
    }

    fn march() -> Vec<Expense> {
        vec![
            expense("2024-03-01", 10, "Food"),
            expense("2024-03-02", 20, "Food"),
            expense("2024-03-15", 5, "Transport"),
        ]
    }

    fn units(values: &[i64]) -> Vec<Money> {
        values.iter().map(|v| Money::from_units(*v)).collect()
    }

    #[test]
    fn test_march_daily_series() {
        let series = build_daily(&march());
        assert_eq!(series.labels, vec!["01", "02", "15"]);
        assert_eq!(series.values, units(&[10, 20, 5]));
        assert_eq!(series.total(), Money::from_units(35));
    }

    #[test]
    fn test_series_json_uses_decimal_units() {
        let json = serde_json::to_string(&build_daily(&march())).unwrap();
        assert_eq!(json, r#"{"labels":["01","02","15"],"values":[10.0,20.0,5.0]}"#);
    }

    #[test]
    fn test_daily_skips_invalid_dates_and_sums_days() {
        let mut expenses = march();
        expenses.push(expense("2024-03-15", 1, "Food"));
        expenses.push(expense("", 100, "Food"));
        expenses.push(expense("garbage", 100, "Food"));
        let series = build_daily(&expenses);
        assert_eq!(series.labels, vec!["01", "02", "15"]);
        assert_eq!(series.values, units(&[10, 20, 6]));
    }

    #[test]
    fn test_daily_statuses() {
        let series = build_daily(&march());
        let settings = Settings {
            daily_budget: Some(Money::from_units(10)),
            ..Settings::default()
        };
        assert_eq!(
            daily_statuses(&series, &settings),
            vec![BudgetStatus::Under, BudgetStatus::Over, BudgetStatus::Under]
        );
        assert!(daily_statuses(&series, &Settings::default())
            .iter()
            .all(|s| *s == BudgetStatus::Neutral));
    }

    #[test]
    fn test_category_keeps_first_seen_order() {
        let expenses = vec![
            expense("2024-03-01", 1, "Transport"),
            expense("2024-03-01", 2, "Bills"),
            expense("2024-03-01", 3, "  "),
            expense("2024-03-01", 4, "Transport"),
            expense("2024-03-01", 5, "Accommodation"),
        ];
        let series = build_category(&expenses);
        assert_eq!(
            series.labels,
            vec!["Transport", "Bills", "Uncategorized", "Accommodation"]
        );
        assert_eq!(series.values, units(&[5, 2, 3, 5]));
    }

    #[test]
    fn test_category_preserves_total() {
        let sets = vec![
            vec![],
            march(),
            vec![
                expense("", 7, ""),
                expense("2024-01-01", 3, "A"),
                Expense::new("2024-01-02", Money::from_cents(1), "B", ""),
                Expense::new("2024-01-02", Money::from_cents(99), "A", ""),
            ],
        ];
        for expenses in sets {
            assert_eq!(build_category(&expenses).total(), total(&expenses));
        }
    }

    #[test]
    fn test_trend_keeps_last_six_months_present() {
        let expenses = vec![
            expense("2023-01-10", 1, "A"),
            expense("2023-05-10", 2, "A"),
            expense("2023-09-10", 3, "A"),
            expense("2023-10-10", 4, "A"),
            expense("2023-12-10", 5, "A"),
            expense("2024-02-10", 6, "A"),
            expense("2024-03-10", 7, "A"),
            expense("2024-03-11", 1, "A"),
            expense("", 100, "A"),
        ];
        let series = build_trend(&expenses);
        assert_eq!(
            series.labels,
            vec!["2023-05", "2023-09", "2023-10", "2023-12", "2024-02", "2024-03"]
        );
        assert_eq!(series.values, units(&[2, 3, 4, 5, 6, 8]));
    }

    #[test]
    fn test_trend_with_few_months() {
        let series = build_trend(&march());
        assert_eq!(series.labels, vec!["2024-03"]);
        assert!(build_trend(&[]).is_empty());
    }
}
