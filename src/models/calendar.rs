//! Date window calculator
//!
//! Every date-bounded computation reads "today" from a [`Calendar`] instead
//! of the system clock, so the same filters and aggregates can be evaluated
//! for any reference day. [`Calendar::local`] pins today to the local date.

use chrono::{Datelike, Days, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{BudgetMateError, BudgetMateResult};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A Monday-to-Sunday window, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    /// The week containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let start = monday_of(date);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Check if a date falls within this week
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The last instant of the window (Sunday 23:59:59.999)
    pub fn end_of_day(&self) -> NaiveDateTime {
        end_of_day(self.end)
    }

    /// Label such as "04.03 - 10.03"
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%d.%m"),
            self.end.format("%d.%m")
        )
    }
}

/// Source of "today" for all window computations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    today: NaiveDate,
}

impl Calendar {
    /// Calendar pinned to the current local date
    pub fn local() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Calendar pinned to a fixed date
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Today's date as `YYYY-MM-DD`
    pub fn today_key(&self) -> String {
        date_key(self.today)
    }

    /// Current month as `YYYY-MM`
    pub fn current_month_key(&self) -> String {
        month_key(self.today.year(), self.today.month())
    }

    /// First day of the month `offset` months away from the current one
    ///
    /// Only the current month (0) and past months (negative) can be selected.
    pub fn selected_month_date(&self, offset: i32) -> BudgetMateResult<NaiveDate> {
        if offset > 0 {
            return Err(BudgetMateError::InvalidMonthOffset(offset));
        }
        let first = first_of_month(self.today);
        first
            .checked_sub_months(Months::new(offset.unsigned_abs()))
            .ok_or(BudgetMateError::InvalidMonthOffset(offset))
    }

    /// Selected month as `YYYY-MM`
    pub fn selected_month_key(&self, offset: i32) -> BudgetMateResult<String> {
        let d = self.selected_month_date(offset)?;
        Ok(month_key(d.year(), d.month()))
    }

    /// Selected month as a label like "Mar 2024"
    pub fn selected_month_label(&self, offset: i32) -> BudgetMateResult<String> {
        let d = self.selected_month_date(offset)?;
        Ok(format!("{} {}", month_abbreviation(d.month()), d.year()))
    }

    /// `YYYY-MM` of the calendar month before the selected one
    pub fn previous_month_key(&self, offset: i32) -> BudgetMateResult<String> {
        let selected = self.selected_month_date(offset)?;
        let previous = selected
            .checked_sub_months(Months::new(1))
            .ok_or(BudgetMateError::InvalidMonthOffset(offset))?;
        Ok(month_key(previous.year(), previous.month()))
    }

    /// Number of days in the selected month
    pub fn selected_days_in_month(&self, offset: i32) -> BudgetMateResult<u32> {
        let d = self.selected_month_date(offset)?;
        Ok(days_in_month(d.year(), d.month()))
    }

    /// Whether the selected month is the real current month
    pub fn is_current_month(&self, offset: i32) -> bool {
        offset == 0
    }

    /// Month offset that selects `year`/`month` (1-based)
    ///
    /// Rejects months after the current one.
    pub fn month_offset_for(&self, year: i32, month: u32) -> BudgetMateResult<i32> {
        if !(1..=12).contains(&month) {
            return Err(BudgetMateError::Validation(format!("Invalid month: {}", month)));
        }
        let offset = (year - self.today.year()) * 12 + (month as i32 - self.today.month() as i32);
        if offset > 0 {
            return Err(BudgetMateError::InvalidMonthOffset(offset));
        }
        Ok(offset)
    }

    /// Monday-to-Sunday window containing today
    pub fn current_week_range(&self) -> WeekRange {
        WeekRange::containing(self.today)
    }

    /// The trailing `count` weeks ending with the current week, oldest first
    pub fn trailing_weeks(&self, count: u32) -> Vec<WeekRange> {
        let current = monday_of(self.today);
        (0..count)
            .rev()
            .map(|back| {
                let start = current - Duration::weeks(i64::from(back));
                WeekRange {
                    start,
                    end: start + Duration::days(6),
                }
            })
            .collect()
    }
}

/// Monday of the week containing `date`
///
/// Sunday belongs to the week that started six days earlier.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday();
    date - Days::new(u64::from(back))
}

/// Format a date as `YYYY-MM-DD`
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a month as `YYYY-MM`
pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// Number of days in a month (1-based month)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = first.and_then(|d| d.checked_add_months(Months::new(1)));
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}

/// Three-letter month name (1-based month)
pub fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS[((month.clamp(1, 12)) - 1) as usize]
}

/// Full month name (1-based month)
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[((month.clamp(1, 12)) - 1) as usize]
}

/// 23:59:59.999 on the given day
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default();
    date.and_time(time)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
