//! Weekly overview: the trailing twelve Monday-to-Sunday weeks

use serde::Serialize;

use crate::display::report::{format_bar, separator};
use crate::models::money::decimal;
use crate::models::{Calendar, Expense, Money, WeekRange};

use super::series::Series;

/// Number of weeks covered by the overview
pub const WEEKS: u32 = 12;

/// Spending in one week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekTotal {
    pub range: WeekRange,
    /// "dd.mm - dd.mm"
    pub label: String,
    #[serde(serialize_with = "decimal::serialize")]
    pub total: Money,
}

/// Weekly overview report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyReport {
    /// Oldest week first, ending with the current week
    pub weeks: Vec<WeekTotal>,
    #[serde(serialize_with = "decimal::serialize")]
    pub total: Money,
    /// Total divided by twelve
    #[serde(serialize_with = "decimal::serialize")]
    pub average: Money,
    /// Lowest-spend week
    pub best: Option<WeekTotal>,
    /// Highest-spend week
    pub worst: Option<WeekTotal>,
}

impl WeeklyReport {
    /// Build the overview ending with the week that contains today
    ///
    /// Ties for best and worst go to the older week.
    pub fn generate(expenses: &[Expense], calendar: &Calendar) -> Self {
        let weeks: Vec<WeekTotal> = calendar
            .trailing_weeks(WEEKS)
            .into_iter()
            .map(|range| {
                let total = expenses
                    .iter()
                    .filter(|e| e.parsed_date().is_some_and(|d| range.contains(d)))
                    .map(|e| e.amount)
                    .sum();
                WeekTotal {
                    label: range.label(),
                    range,
                    total,
                }
            })
            .collect();

        let mut best: Option<&WeekTotal> = None;
        let mut worst: Option<&WeekTotal> = None;
        for week in &weeks {
            if best.map_or(true, |b| week.total < b.total) {
                best = Some(week);
            }
            if worst.map_or(true, |w| week.total > w.total) {
                worst = Some(week);
            }
        }
        let best = best.cloned();
        let worst = worst.cloned();

        let total: Money = weeks.iter().map(|w| w.total).sum();
        Self {
            average: total.div_round(i64::from(WEEKS)),
            total,
            best,
            worst,
            weeks,
        }
    }

    /// Weekly totals as a chart series
    pub fn series(&self) -> Series {
        Series {
            labels: self.weeks.iter().map(|w| w.label.clone()).collect(),
            values: self.weeks.iter().map(|w| w.total).collect(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        let max = self.weeks.iter().map(|w| w.total).max().unwrap_or_default();

        output.push_str("Last 12 weeks\n");
        output.push_str(&separator(50));
        output.push('\n');
        for week in &self.weeks {
            output.push_str(&format!(
                "{} {} {:>12}\n",
                week.label,
                format_bar(week.total.as_f64(), max.as_f64(), 20),
                week.total.format_with_symbol(symbol)
            ));
        }
        output.push_str(&separator(50));
        output.push('\n');
        output.push_str(&format!("Total:   {}\n", self.total.format_with_symbol(symbol)));
        output.push_str(&format!(
            "Average: {} per week\n",
            self.average.format_with_symbol(symbol)
        ));
        if let Some(best) = &self.best {
            output.push_str(&format!(
                "Best:    {} ({})\n",
                best.label,
                best.total.format_with_symbol(symbol)
            ));
        }
        if let Some(worst) = &self.worst {
            output.push_str(&format!(
                "Worst:   {} ({})\n",
                worst.label,
                worst.total.format_with_symbol(symbol)
            ));
        }
        output
    }
}
