//! CSV Export functionality
//!
//! The simple format round-trips through import: commas inside text fields
//! are replaced with spaces instead of being quoted. The rich format is meant
//! for spreadsheets that expect `;` as the separator.

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};

use crate::error::{BudgetMateError, BudgetMateResult};
use crate::models::Expense;
use crate::services::import::SIMPLE_HEADER;

/// Header line of the rich format (written unquoted)
pub const RICH_HEADER: &str = "Date;Category;Amount;Note";

/// Export expenses in the simple format
///
/// Returns the number of rows written.
pub fn export_simple_csv<W: Write>(
    expenses: &[Expense],
    writer: &mut W,
) -> BudgetMateResult<usize> {
    ensure_not_empty(expenses)?;

    writeln!(writer, "{}", SIMPLE_HEADER).map_err(export_error)?;
    for expense in expenses {
        writeln!(
            writer,
            "{},{},{},{}",
            expense.date,
            strip_commas(&expense.category),
            expense.amount,
            strip_commas(&expense.note)
        )
        .map_err(export_error)?;
    }

    tracing::info!(rows = expenses.len(), "Exported simple CSV");
    Ok(expenses.len())
}

/// Export expenses in the rich format
///
/// Every data field is quoted, with embedded quotes doubled.
pub fn export_rich_csv<W: Write>(expenses: &[Expense], writer: &mut W) -> BudgetMateResult<usize> {
    ensure_not_empty(expenses)?;

    writeln!(writer, "{}", RICH_HEADER).map_err(export_error)?;
    let mut out = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_writer(writer);
    for expense in expenses {
        let amount = expense.amount.to_string();
        out.write_record([
            expense.date.as_str(),
            expense.category.as_str(),
            amount.as_str(),
            expense.note.as_str(),
        ])?;
    }
    out.flush().map_err(export_error)?;

    tracing::info!(rows = expenses.len(), "Exported rich CSV");
    Ok(expenses.len())
}

fn ensure_not_empty(expenses: &[Expense]) -> BudgetMateResult<()> {
    if expenses.is_empty() {
        return Err(BudgetMateError::Export("No expenses to export".into()));
    }
    Ok(())
}

fn strip_commas(s: &str) -> String {
    s.replace(',', " ")
}

fn export_error(e: std::io::Error) -> BudgetMateError {
    BudgetMateError::Export(e.to_string())
}
