//! Budget evaluator
//!
//! Turns a spending total and the budget settings into an under/over verdict.
//! Nothing here holds state; every function reads its inputs and returns a
//! fresh value.

use chrono::Datelike;
use serde::Serialize;
use std::fmt;

use crate::config::Settings;
use crate::error::BudgetMateResult;
use crate::models::calendar::days_in_month;
use crate::models::money::decimal;
use crate::models::{Calendar, Expense, Money, Period};

/// Outcome of comparing a total with a budget ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Under,
    Over,
    /// No ceiling applies
    Neutral,
}

impl BudgetStatus {
    /// Status of `total` against an optional limit; spending exactly the limit is "under"
    pub fn of(total: Money, limit: Option<Money>) -> Self {
        match limit {
            Some(limit) if total > limit => Self::Over,
            Some(_) => Self::Under,
            None => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under => "under",
            Self::Over => "over",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A total compared with its ceiling
///
/// `diff` is the distance to the ceiling and is always non-negative; the
/// direction is carried by `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    #[serde(serialize_with = "decimal::serialize")]
    pub total: Money,
    #[serde(serialize_with = "decimal::option::serialize")]
    pub ceiling: Option<Money>,
    #[serde(serialize_with = "decimal::option::serialize")]
    pub diff: Option<Money>,
    pub status: BudgetStatus,
}

impl Verdict {
    /// Compare a total with an optional ceiling
    pub fn evaluate(total: Money, ceiling: Option<Money>) -> Self {
        match ceiling {
            Some(ceiling) => {
                let diff = ceiling - total;
                Self {
                    total,
                    ceiling: Some(ceiling),
                    diff: Some(diff.abs()),
                    status: if diff.is_negative() {
                        BudgetStatus::Over
                    } else {
                        BudgetStatus::Under
                    },
                }
            }
            None => Self::neutral(total),
        }
    }

    /// A verdict with no ceiling
    pub fn neutral(total: Money) -> Self {
        Self {
            total,
            ceiling: None,
            diff: None,
            status: BudgetStatus::Neutral,
        }
    }

    /// One-line description such as "under by 337.00 €"
    pub fn describe(&self, symbol: &str) -> String {
        match (self.status, self.diff) {
            (BudgetStatus::Under, Some(diff)) => {
                format!("under by {}", diff.format_with_symbol(symbol))
            }
            (BudgetStatus::Over, Some(diff)) => {
                format!("OVER by {}", diff.format_with_symbol(symbol))
            }
            _ => "no budget set".to_string(),
        }
    }
}

/// Budget ceiling for a period
///
/// `days_in_selected_month` is only consulted for [`Period::Month`] when no
/// monthly budget is set.
pub fn ceiling(period: Period, settings: &Settings, days_in_selected_month: u32) -> Option<Money> {
    match period {
        Period::Month => settings.limit_for_days(days_in_selected_month),
        Period::Day => settings.daily(),
        Period::Week => settings.daily().map(|d| d.times(7)),
        Period::All | Period::Range => None,
    }
}

/// Verdict for a filtered total under a given period and month offset
pub fn period_verdict(
    total: Money,
    period: Period,
    settings: &Settings,
    calendar: &Calendar,
    month_offset: i32,
) -> BudgetMateResult<Verdict> {
    let days = calendar.selected_days_in_month(month_offset)?;
    Ok(Verdict::evaluate(total, ceiling(period, settings, days)))
}

/// Sum of the selected month's amounts on days up to today's day-of-month
pub(crate) fn spent_through_today(
    expenses: &[Expense],
    month_key: &str,
    today_day: u32,
) -> Money {
    expenses
        .iter()
        .filter(|e| e.in_month(month_key))
        .filter(|e| e.day_of_month().is_some_and(|d| d <= today_day))
        .map(|e| e.amount)
        .sum()
}

/// Cumulative-to-date verdict against the daily budget
///
/// Allowed so far is the daily budget times today's day-of-month; spent so
/// far sums the selected month's expenses on days up to that day. Returns
/// `None` without a daily budget.
pub fn cumulative_to_date(
    expenses: &[Expense],
    settings: &Settings,
    calendar: &Calendar,
    month_offset: i32,
) -> BudgetMateResult<Option<CumulativeVerdict>> {
    let Some(daily) = settings.daily() else {
        return Ok(None);
    };
    let month_key = calendar.selected_month_key(month_offset)?;
    let day = calendar.today().day();
    let spent = spent_through_today(expenses, &month_key, day);
    let allowed = daily.times(i64::from(day));

    Ok(Some(CumulativeVerdict {
        days: day,
        verdict: Verdict::evaluate(spent, Some(allowed)),
    }))
}

/// Cumulative verdict plus the number of days it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CumulativeVerdict {
    pub days: u32,
    pub verdict: Verdict,
}

/// How the remaining amount was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainingMethod {
    MonthlyBudget,
    ProjectedDailyBudget,
}

impl fmt::Display for RemainingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonthlyBudget => write!(f, "based on monthly budget"),
            Self::ProjectedDailyBudget => write!(f, "based on projected daily budget"),
        }
    }
}

/// Budget left in the current month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    /// May be negative once the budget is exhausted
    #[serde(serialize_with = "decimal::serialize")]
    pub amount: Money,
    pub method: RemainingMethod,
}

/// Budget left in the real current month
///
/// Monthly budget minus the month's total; otherwise the daily budget times
/// the days left (today included) minus the month's total.
pub fn remaining_this_month(
    expenses: &[Expense],
    settings: &Settings,
    calendar: &Calendar,
) -> Option<Remaining> {
    let month_key = calendar.current_month_key();
    let total: Money = expenses
        .iter()
        .filter(|e| e.in_month(&month_key))
        .map(|e| e.amount)
        .sum();

    if let Some(monthly) = settings.monthly() {
        return Some(Remaining {
            amount: monthly - total,
            method: RemainingMethod::MonthlyBudget,
        });
    }

    let daily = settings.daily()?;
    let today = calendar.today();
    let remaining_days =
        (days_in_month(today.year(), today.month()) + 1).saturating_sub(today.day());
    Some(Remaining {
        amount: daily.times(i64::from(remaining_days)) - total,
        method: RemainingMethod::ProjectedDailyBudget,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(units: i64) -> Settings {
        Settings {
            daily_budget: Some(Money::from_units(units)),
            ..Settings::default()
        }
    }

    fn monthly(units: i64) -> Settings {
        Settings {
            monthly_budget: Some(Money::from_units(units)),
            ..Settings::default()
        }
    }

    fn expense(date: &str, units: i64) -> Expense {
        Expense::new(date, Money::from_units(units), "Food", "")
    }

    #[test]
    fn test_ceilings() {
        let s = daily(12);
        assert_eq!(ceiling(Period::Month, &s, 31), Some(Money::from_units(372)));
        assert_eq!(ceiling(Period::Day, &s, 31), Some(Money::from_units(12)));
        assert_eq!(ceiling(Period::Week, &s, 31), Some(Money::from_units(84)));
        assert_eq!(ceiling(Period::All, &s, 31), None);
        assert_eq!(ceiling(Period::Range, &s, 31), None);

        let m = monthly(400);
        assert_eq!(ceiling(Period::Month, &m, 30), Some(Money::from_units(400)));
        assert_eq!(ceiling(Period::Day, &m, 30), None);
        assert_eq!(ceiling(Period::Week, &m, 30), None);
    }

    #[test]
    fn test_verdict_sign_property() {
        let cases = [(0, 100), (100, 100), (101, 100), (5000, 3), (3, 5000), (0, 0)];
        for (total, limit) in cases {
            let v = Verdict::evaluate(Money::from_cents(total), Some(Money::from_cents(limit)));
            assert_eq!(v.status == BudgetStatus::Over, total > limit);
            assert_eq!(v.diff, Some(Money::from_cents((total - limit).abs())));
        }
    }

    #[test]
    fn test_neutral_without_ceiling() {
        let v = Verdict::evaluate(Money::from_units(35), None);
        assert_eq!(v.status, BudgetStatus::Neutral);
        assert_eq!(v.ceiling, None);
        assert_eq!(v.diff, None);
        assert_eq!(v.total, Money::from_units(35));
    }

    #[test]
    fn test_march_scenario_month_verdict() {
        let cal = Calendar::at(ymd(2024, 3, 20));
        let v = period_verdict(Money::from_units(35), Period::Month, &daily(12), &cal, 0).unwrap();
        assert_eq!(v.ceiling, Some(Money::from_units(372)));
        assert_eq!(v.status, BudgetStatus::Under);
        assert_eq!(v.diff, Some(Money::from_units(337)));
        assert_eq!(v.describe("€"), "under by 337.00 €");
    }

    #[test]
    fn test_verdict_serializes_for_sinks() {
        let json = serde_json::to_value(Verdict::neutral(Money::from_units(1))).unwrap();
        assert_eq!(json["status"], "neutral");
        assert_eq!(json["total"], 1.0);
        assert!(json["ceiling"].is_null());

        let over = Verdict::evaluate(Money::from_cents(1250), Some(Money::from_units(10)));
        let json = serde_json::to_value(over).unwrap();
        assert_eq!(json["ceiling"], 10.0);
        assert_eq!(json["diff"], 2.5);
    }

    #[test]
    fn test_cumulative_to_date() {
        let cal = Calendar::at(ymd(2024, 3, 10));
        let expenses = vec![
            expense("2024-03-01", 50),
            expense("2024-03-10", 60),
            expense("2024-03-11", 500),
            expense("2024-02-05", 500),
            expense("", 500),
        ];
        let cumulative = cumulative_to_date(&expenses, &daily(10), &cal, 0)
            .unwrap()
            .unwrap();
        assert_eq!(cumulative.days, 10);
        assert_eq!(cumulative.verdict.total, Money::from_units(110));
        assert_eq!(cumulative.verdict.ceiling, Some(Money::from_units(100)));
        assert_eq!(cumulative.verdict.status, BudgetStatus::Over);
        assert_eq!(cumulative.verdict.diff, Some(Money::from_units(10)));

        assert!(cumulative_to_date(&expenses, &monthly(100), &cal, 0)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_remaining_this_month() {
        let cal = Calendar::at(ymd(2024, 3, 30));
        let expenses = vec![expense("2024-03-01", 50), expense("2024-02-01", 999)];

        let by_month = remaining_this_month(&expenses, &monthly(400), &cal).unwrap();
        assert_eq!(by_month.amount, Money::from_units(350));
        assert_eq!(by_month.method, RemainingMethod::MonthlyBudget);

        // 31 - 30 + 1 = 2 days left
        let by_day = remaining_this_month(&expenses, &daily(10), &cal).unwrap();
        assert_eq!(by_day.amount, Money::from_units(-30));
        assert_eq!(by_day.method, RemainingMethod::ProjectedDailyBudget);

        assert!(remaining_this_month(&expenses, &Settings::default(), &cal).is_none());
    }
}
