//! CLI commands for reports
//!
//! Month view, yearly and weekly overviews, and chart series. Every report
//! can be printed as JSON instead of the terminal rendering.

use chrono::Datelike;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::display::format_series_chart;
use crate::error::BudgetMateResult;
use crate::models::{Calendar, CategoryFilter, FilterState, Period};
use crate::reports::{build_category, build_trend, MonthReport, WeeklyReport, YearlyReport};
use crate::services::apply_filter;
use crate::storage::RecordStore;

use super::filter::FilterArgs;

/// Month selection for `report month`
#[derive(Args, Debug)]
pub struct MonthArgs {
    /// Month relative to the current one (0 = current, -1 = previous, ...)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "month")]
    pub offset: Option<i32>,

    /// Month to show as YYYY-MM
    #[arg(long)]
    pub month: Option<String>,

    /// Only include this category
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Daily chart, categories and budget standing for one month
    Month {
        #[command(flatten)]
        selection: MonthArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Monthly totals for a year against the budget
    Year {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Totals of the last 12 weeks
    Weeks {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Monthly totals of the last six months with data
    Trend {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Spending per category
    Categories {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(
    store: &dyn RecordStore,
    calendar: &Calendar,
    cmd: ReportCommands,
) -> BudgetMateResult<()> {
    let settings = store.settings();
    let symbol = settings.currency_symbol.as_str();
    let expenses = store.expenses();

    match cmd {
        ReportCommands::Month { selection, json } => {
            let range = FilterArgs {
                offset: selection.offset,
                month: selection.month,
                ..FilterArgs::default()
            };
            let mut filter = FilterState::new()
                .with_period(Period::Month)
                .with_month_offset(range.month_offset(calendar)?)?;
            if let Some(category) = &selection.category {
                filter = filter.with_category(CategoryFilter::parse(category));
            }

            let month_expenses = apply_filter(&expenses, &filter, calendar)?;
            let report = MonthReport::generate(
                &expenses,
                &month_expenses,
                &settings,
                calendar,
                filter.month_offset(),
            )?;
            print_report(&report, json, || report.format_terminal(symbol))
        }

        ReportCommands::Year { year, json } => {
            let year = year.unwrap_or_else(|| calendar.today().year());
            let report = YearlyReport::generate(&expenses, year, &settings);
            print_report(&report, json, || report.format_terminal(symbol))
        }

        ReportCommands::Weeks { json } => {
            let report = WeeklyReport::generate(&expenses, calendar);
            print_report(&report, json, || report.format_terminal(symbol))
        }

        ReportCommands::Trend { filter, json } => {
            let filtered = apply_filter(&expenses, &filter.to_filter(calendar)?, calendar)?;
            let series = build_trend(&filtered);
            print_report(&series, json, || {
                format_series_chart("Monthly trend", &series, symbol)
            })
        }

        ReportCommands::Categories { filter, json } => {
            let filtered = apply_filter(&expenses, &filter.to_filter(calendar)?, calendar)?;
            let series = build_category(&filtered);
            print_report(&series, json, || {
                format_series_chart("Spending by category", &series, symbol)
            })
        }
    }
}

fn print_report<T: Serialize>(
    report: &T,
    json: bool,
    terminal: impl FnOnce() -> String,
) -> BudgetMateResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", terminal());
    }
    Ok(())
}
