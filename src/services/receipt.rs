//! Receipt text parsing
//!
//! Turns OCR output into guesses for an expense's amount and date. The
//! largest decimal amount on the receipt is taken as the total.

use std::sync::OnceLock;

use chrono::Datelike;
use regex::Regex;

use crate::models::{Calendar, Money};

/// Amount and date guessed from receipt text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptGuess {
    pub amount: Option<Money>,
    /// `YYYY-MM-DD`, not validated as a calendar date
    pub date: Option<String>,
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+[.,]\d{2}").expect("valid amount regex"))
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{2}[./-]\d{2}[./-]\d{2,4}|\d{4}-\d{2}-\d{2})").expect("valid date regex")
    })
}

/// Extract an amount and a date from receipt text
///
/// Dates in `dd.mm.yy`, `dd/mm/yyyy` or `dd-mm-yyyy` form are normalized to
/// ISO; two-digit years mean 20yy. An ISO date is taken as is.
pub fn parse_receipt(text: &str, calendar: &Calendar) -> ReceiptGuess {
    let amount = amount_pattern()
        .find_iter(text)
        .filter_map(|m| Money::parse(m.as_str()).ok())
        .max();

    let date = date_pattern()
        .find(text)
        .map(|m| normalize_date(m.as_str(), calendar.today().year()));

    ReceiptGuess { amount, date }
}

fn normalize_date(raw: &str, current_year: i32) -> String {
    if raw.find('-') == Some(4) {
        return raw.to_string();
    }
    let parts: Vec<&str> = raw.split(['.', '/', '-']).collect();
    let day = parts.first().copied().unwrap_or_default();
    let month = parts.get(1).copied().unwrap_or_default();
    let year = match parts.get(2) {
        Some(yy) if yy.len() == 2 => yy.parse::<i32>().map_or(current_year, |y| 2000 + y),
        Some(yyyy) if yyyy.len() == 4 => yyyy.parse().unwrap_or(current_year),
        _ => current_year,
    };
    format!("{}-{:0>2}-{:0>2}", year, month, day)
}
