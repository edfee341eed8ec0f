//! Month view: summary, month-over-month change and same-month projection

use chrono::Datelike;
use serde::Serialize;

use crate::config::Settings;
use crate::display::report::{format_bar, separator};
use crate::error::BudgetMateResult;
use crate::models::money::decimal;
use crate::models::{Calendar, Expense, Money, Period};

use super::series::{build_category, build_daily, daily_statuses, Series};
use super::verdict::{
    cumulative_to_date, period_verdict, spent_through_today, BudgetStatus, CumulativeVerdict,
    Verdict,
};

/// Sum of the month against the budget for the days counted so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    #[serde(serialize_with = "decimal::serialize")]
    pub total: Money,
    /// Days in the month for past months, today's day for the current month
    pub days: u32,
    #[serde(serialize_with = "decimal::option::serialize")]
    pub budget: Option<Money>,
    pub status: BudgetStatus,
}

impl MonthSummary {
    pub fn generate(
        month_expenses: &[Expense],
        settings: &Settings,
        calendar: &Calendar,
        month_offset: i32,
    ) -> BudgetMateResult<Self> {
        let days = if calendar.is_current_month(month_offset) {
            calendar.today().day()
        } else {
            calendar.selected_days_in_month(month_offset)?
        };
        let total: Money = month_expenses.iter().map(|e| e.amount).sum();
        let budget = settings.limit_for_days(days);
        Ok(Self {
            total,
            days,
            budget,
            status: BudgetStatus::of(total, budget),
        })
    }
}

/// Selected month compared with the calendar month before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonthChange {
    /// The previous month has a zero total
    NoPreviousData {
        #[serde(serialize_with = "decimal::serialize")]
        current: Money,
    },
    Change {
        #[serde(serialize_with = "decimal::serialize")]
        current: Money,
        #[serde(serialize_with = "decimal::serialize")]
        previous: Money,
        /// `current - previous`
        #[serde(serialize_with = "decimal::serialize")]
        diff: Money,
    },
}

impl MonthChange {
    /// Compare month totals over the whole, unfiltered expense set
    pub fn generate(
        all_expenses: &[Expense],
        calendar: &Calendar,
        month_offset: i32,
    ) -> BudgetMateResult<Self> {
        let current_key = calendar.selected_month_key(month_offset)?;
        let previous_key = calendar.previous_month_key(month_offset)?;
        let sum_for = |key: &str| -> Money {
            all_expenses
                .iter()
                .filter(|e| e.in_month(key))
                .map(|e| e.amount)
                .sum()
        };
        let current = sum_for(&current_key);
        let previous = sum_for(&previous_key);

        Ok(Self::between(current, previous))
    }

    /// Change between two totals
    pub fn between(current: Money, previous: Money) -> Self {
        if previous.is_zero() {
            Self::NoPreviousData { current }
        } else {
            Self::Change {
                current,
                previous,
                diff: current - previous,
            }
        }
    }

    pub fn describe(&self, symbol: &str) -> String {
        match self {
            Self::NoPreviousData { .. } => {
                "Change vs previous month: no previous month data.".to_string()
            }
            Self::Change { diff, .. } if diff.is_positive() => format!(
                "Change vs previous month: +{} (↑)",
                diff.format_with_symbol(symbol)
            ),
            Self::Change { diff, .. } if diff.is_negative() => format!(
                "Change vs previous month: -{} (↓)",
                diff.abs().format_with_symbol(symbol)
            ),
            Self::Change { .. } => format!(
                "Change vs previous month: {} (→)",
                Money::zero().format_with_symbol(symbol)
            ),
        }
    }
}

/// Projected month total from the average daily spend so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Projection {
    #[serde(serialize_with = "decimal::serialize")]
    pub spent_so_far: Money,
    #[serde(serialize_with = "decimal::serialize")]
    pub average_daily: Money,
    #[serde(serialize_with = "decimal::serialize")]
    pub projected: Money,
    #[serde(serialize_with = "decimal::option::serialize")]
    pub limit: Option<Money>,
    pub status: BudgetStatus,
}

impl Projection {
    /// Project the current month; `None` for any other month
    pub fn generate(
        month_expenses: &[Expense],
        settings: &Settings,
        calendar: &Calendar,
        month_offset: i32,
    ) -> BudgetMateResult<Option<Self>> {
        if !calendar.is_current_month(month_offset) {
            return Ok(None);
        }
        let today = calendar.today();
        let day = today.day();
        let days_in_month = calendar.selected_days_in_month(month_offset)?;
        let month_key = calendar.selected_month_key(month_offset)?;

        let spent_so_far = spent_through_today(month_expenses, &month_key, day);
        let projected = spent_so_far.scale(i64::from(days_in_month), i64::from(day));
        let limit = settings.limit_for_days(days_in_month);

        Ok(Some(Self {
            spent_so_far,
            average_daily: spent_so_far.div_round(i64::from(day)),
            projected,
            limit,
            status: BudgetStatus::of(projected, limit),
        }))
    }
}

/// Everything shown for the selected month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthReport {
    pub month_key: String,
    pub label: String,
    pub daily: Series,
    pub daily_status: Vec<BudgetStatus>,
    pub categories: Series,
    pub verdict: Verdict,
    pub summary: MonthSummary,
    pub cumulative: Option<CumulativeVerdict>,
    pub change: MonthChange,
    pub projection: Option<Projection>,
}

impl MonthReport {
    /// Build the month view
    ///
    /// `month_expenses` is the filtered view of the selected month; the
    /// month-over-month change is computed from `all_expenses`.
    pub fn generate(
        all_expenses: &[Expense],
        month_expenses: &[Expense],
        settings: &Settings,
        calendar: &Calendar,
        month_offset: i32,
    ) -> BudgetMateResult<Self> {
        let daily = build_daily(month_expenses);
        let daily_status = daily_statuses(&daily, settings);
        let total: Money = month_expenses.iter().map(|e| e.amount).sum();

        Ok(Self {
            month_key: calendar.selected_month_key(month_offset)?,
            label: calendar.selected_month_label(month_offset)?,
            daily_status,
            daily,
            categories: build_category(month_expenses),
            verdict: period_verdict(total, Period::Month, settings, calendar, month_offset)?,
            summary: MonthSummary::generate(month_expenses, settings, calendar, month_offset)?,
            cumulative: cumulative_to_date(month_expenses, settings, calendar, month_offset)?,
            change: MonthChange::generate(all_expenses, calendar, month_offset)?,
            projection: Projection::generate(month_expenses, settings, calendar, month_offset)?,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str(&format!("Month: {}\n", self.label));
        output.push_str(&separator(50));
        output.push('\n');

        if self.daily.is_empty() {
            output.push_str("No expenses this month.\n");
        }
        let max = self.daily.max_value();
        for ((day, value), status) in self.daily.points().zip(&self.daily_status) {
            let marker = match status {
                BudgetStatus::Over => " !",
                _ => "",
            };
            output.push_str(&format!(
                "{} {} {:>12}{}\n",
                day,
                format_bar(value.as_f64(), max.as_f64(), 25),
                money(value),
                marker
            ));
        }
        output.push_str(&separator(50));
        output.push('\n');

        let summary = &self.summary;
        let mut line = format!("Sum: {} • Days: {}", money(summary.total), summary.days);
        if let Some(budget) = summary.budget {
            line.push_str(&format!(" • Budget: {}", money(budget)));
            line.push_str(match summary.status {
                BudgetStatus::Over => " • OVER budget",
                _ => " • Under budget",
            });
        }
        output.push_str(&line);
        output.push('\n');

        if let Some(ceiling) = self.verdict.ceiling {
            output.push_str(&format!(
                "Month budget {}: {}\n",
                money(ceiling),
                self.verdict.describe(symbol)
            ));
        }

        if let Some(cumulative) = &self.cumulative {
            output.push_str(&format!(
                "Cumulative spending: {} • Allowed so far ({} days): {} • {}\n",
                money(cumulative.verdict.total),
                cumulative.days,
                money(cumulative.verdict.ceiling.unwrap_or_default()),
                cumulative.verdict.describe(symbol)
            ));
        }

        output.push_str(&self.change.describe(symbol));
        output.push('\n');

        match &self.projection {
            Some(projection) => {
                let mut line = format!(
                    "Projected total for this month: {} (based on average daily spending)",
                    money(projection.projected)
                );
                if let Some(limit) = projection.limit {
                    line.push_str(&match projection.status {
                        BudgetStatus::Over => format!(" • would OVER budget ({})", money(limit)),
                        _ => format!(" • within budget ({})", money(limit)),
                    });
                }
                output.push_str(&line);
                output.push('\n');
            }
            None => output.push_str("Projection is only available for the current month.\n"),
        }

        if !self.categories.is_empty() {
            output.push_str("\nBy category:\n");
            for (category, value) in self.categories.points() {
                output.push_str(&format!("  {:<24} {:>12}\n", category, money(value)));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

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

    fn daily(units: i64) -> Settings {
        Settings {
            daily_budget: Some(Money::from_units(units)),
            ..Settings::default()
        }
    }

    #[test]
    fn test_no_previous_month_data() {
        let change = MonthChange::between(Money::from_units(50), Money::zero());
        assert_eq!(
            change,
            MonthChange::NoPreviousData {
                current: Money::from_units(50)
            }
        );
        assert_eq!(
            change.describe("€"),
            "Change vs previous month: no previous month data."
        );
    }

    #[test]
    fn test_month_change_uses_previous_calendar_month() {
        let cal = Calendar::at(ymd(2024, 3, 20));
        let mut all = march();
        all.push(expense("2024-02-10", 50, "Food"));
        all.push(expense("2024-01-10", 999, "Food"));

        let change = MonthChange::generate(&all, &cal, 0).unwrap();
        assert_eq!(
            change,
            MonthChange::Change {
                current: Money::from_units(35),
                previous: Money::from_units(50),
                diff: Money::from_units(-15),
            }
        );
        assert_eq!(change.describe("€"), "Change vs previous month: -15.00 € (↓)");

        let no_data = MonthChange::generate(&march(), &cal, 0).unwrap();
        assert!(matches!(no_data, MonthChange::NoPreviousData { .. }));
    }

    #[test]
    fn test_summary_counts_days() {
        let cal = Calendar::at(ymd(2024, 3, 10));
        let current = MonthSummary::generate(&march(), &daily(12), &cal, 0).unwrap();
        assert_eq!(current.days, 10);
        assert_eq!(current.budget, Some(Money::from_units(120)));
        assert_eq!(current.status, BudgetStatus::Under);

        let feb = MonthSummary::generate(&[], &daily(12), &cal, -1).unwrap();
        assert_eq!(feb.days, 29);
        assert_eq!(feb.budget, Some(Money::from_units(348)));
    }

    #[test]
    fn test_projection_only_for_current_month() {
        let cal = Calendar::at(ymd(2024, 3, 10));
        assert!(Projection::generate(&march(), &daily(12), &cal, -1)
            .unwrap()
            .is_none());

        // 30 spent over 10 days, 31 days in March
        let projection = Projection::generate(&march(), &daily(12), &cal, 0)
            .unwrap()
            .unwrap();
        assert_eq!(projection.spent_so_far, Money::from_units(30));
        assert_eq!(projection.average_daily, Money::from_units(3));
        assert_eq!(projection.projected, Money::from_units(93));
        assert_eq!(projection.limit, Some(Money::from_units(372)));
        assert_eq!(projection.status, BudgetStatus::Under);
    }

    #[test]
    fn test_projection_rounds_once() {
        let cal = Calendar::at(ymd(2024, 3, 3));
        let expenses = vec![expense("2024-03-01", 10, "Food")];
        let projection = Projection::generate(&expenses, &Settings::default(), &cal, 0)
            .unwrap()
            .unwrap();
        // 10 * 31 / 3 = 103.333...
        assert_eq!(projection.projected, Money::from_cents(10333));
        assert_eq!(projection.status, BudgetStatus::Neutral);
    }

    #[test]
    fn test_march_scenario_report() {
        let cal = Calendar::at(ymd(2024, 3, 31));
        let report = MonthReport::generate(&march(), &march(), &daily(12), &cal, 0).unwrap();

        assert_eq!(report.month_key, "2024-03");
        assert_eq!(report.label, "Mar 2024");
        assert_eq!(report.daily.labels, vec!["01", "02", "15"]);
        assert_eq!(
            report.daily.values,
            vec![
                Money::from_units(10),
                Money::from_units(20),
                Money::from_units(5)
            ]
        );
        assert_eq!(report.verdict.total, Money::from_units(35));
        assert_eq!(report.verdict.ceiling, Some(Money::from_units(372)));
        assert_eq!(report.verdict.status, BudgetStatus::Under);
        assert_eq!(report.verdict.diff, Some(Money::from_units(337)));
        assert_eq!(report.categories.labels, vec!["Food", "Transport"]);

        let text = report.format_terminal("€");
        assert!(text.contains("Month: Mar 2024"));
        assert!(text.contains("under by 337.00 €"));
        assert!(text.contains("no previous month data"));
    }
}
