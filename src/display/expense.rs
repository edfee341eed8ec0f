//! Expense display formatting
//!
//! Renders the filtered expense list as a table and the summary bar below it.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Calendar, CategoryFilter, Expense, FilterState, Period};
use crate::reports::Verdict;

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Format expenses as a table
pub fn format_expense_table(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.short(),
        date: e.date.clone(),
        category: truncate(e.category_label(), 24),
        amount: e.amount.format_with_symbol(symbol),
        note: truncate(&e.note, 32),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.modify(Columns::single(3), Alignment::right());
    table.to_string()
}

/// Human label for the filter's period
pub fn period_label(filter: &FilterState, calendar: &Calendar) -> String {
    match filter.effective_period() {
        Period::All => "All data".to_string(),
        Period::Day => "Today".to_string(),
        Period::Week => "This week".to_string(),
        Period::Month if filter.month_offset() == 0 => "This month".to_string(),
        Period::Month => calendar
            .selected_month_label(filter.month_offset())
            .unwrap_or_else(|_| "Selected month".to_string()),
        Period::Range => {
            let bound = |d: Option<chrono::NaiveDate>| {
                d.map_or_else(|| "…".to_string(), |d| d.format("%Y-%m-%d").to_string())
            };
            format!("{} to {}", bound(filter.from), bound(filter.to))
        }
    }
}

/// Summary bar: filter description, total, and the verdict when a budget applies
pub fn format_filter_summary(
    filter: &FilterState,
    calendar: &Calendar,
    verdict: &Verdict,
    symbol: &str,
) -> String {
    let category = match &filter.category {
        CategoryFilter::All => String::new(),
        CategoryFilter::Named(name) => format!(", category: {}", name),
    };
    let mut line = format!(
        "Filter: {}{} • Total: {}",
        period_label(filter, calendar),
        category,
        verdict.total.format_with_symbol(symbol)
    );
    if verdict.ceiling.is_some() {
        line.push_str(" • ");
        line.push_str(&verdict.describe(symbol));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn calendar() -> Calendar {
        Calendar::at(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap())
    }

    #[test]
    fn test_expense_table() {
        let expenses = vec![
            Expense::new("2024-03-01", Money::from_cents(1050), "Food", "lunch"),
            Expense::new("2024-03-02", Money::from_units(3), "", ""),
        ];
        let table = format_expense_table(&expenses, "€");
        assert!(table.contains("Category"));
        assert!(table.contains("10.50 €"));
        assert!(table.contains("Uncategorized"));
        assert!(table.contains(&expenses[0].id.short()));

        assert_eq!(format_expense_table(&[], "€"), "No expenses found.");
    }

    #[test]
    fn test_period_labels() {
        let calendar = calendar();
        let filter = FilterState::new().with_period(Period::Month);
        assert_eq!(period_label(&filter, &calendar), "This month");

        let back = filter.with_month_offset(-1).unwrap();
        assert_eq!(period_label(&back, &calendar), calendar.selected_month_label(-1).unwrap());

        let range = FilterState::new().with_range(NaiveDate::from_ymd_opt(2024, 3, 1), None);
        assert_eq!(period_label(&range, &calendar), "2024-03-01 to …");
        assert_eq!(
            period_label(&FilterState::new().with_range(None, None), &calendar),
            "All data"
        );
    }

    #[test]
    fn test_filter_summary() {
        let filter = FilterState::new()
            .with_period(Period::Month)
            .with_category(CategoryFilter::parse("Food"));
        let verdict = Verdict::evaluate(Money::from_units(35), Some(Money::from_units(372)));
        assert_eq!(
            format_filter_summary(&filter, &calendar(), &verdict, "€"),
            "Filter: This month, category: Food • Total: 35.00 € • under by 337.00 €"
        );

        let neutral = Verdict::neutral(Money::from_units(35));
        assert_eq!(
            format_filter_summary(&FilterState::new(), &calendar(), &neutral, "€"),
            "Filter: All data • Total: 35.00 €"
        );
    }
}
