//! CSV import service
//!
//! Reads the simple `date,category,amount,note` format. A batch is applied
//! only if every row is valid; otherwise nothing is written and the error
//! names the first failing line (the header is line 1, blank lines are not
//! counted). Fields are split on commas only; quote characters are kept as
//! plain text, matching what the simple export writes.

use std::fmt;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{BudgetMateError, BudgetMateResult};
use crate::models::{CategoryList, Expense, Money, MoneyParseError};
use crate::storage::RecordStore;

/// Expected header of the simple CSV format
pub const SIMPLE_HEADER: &str = "date,category,amount,note";

/// How imported rows combine with existing expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Replace all expenses and rebuild the category list
    #[default]
    Overwrite,
    /// Keep existing expenses and add the imported ones after them
    Append,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Append => write!(f, "append"),
        }
    }
}

/// A validated row, before canonicalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// 1-based line number among non-blank lines
    pub line: usize,
    pub date: String,
    pub category: String,
    pub amount: Money,
    pub note: String,
}

/// Result of a completed import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub mode: ImportMode,
    /// Rows imported from the file
    pub imported: usize,
    /// Expenses stored after the import
    pub total: usize,
    /// Categories stored after the import
    pub categories: usize,
}

/// Parse simple-format CSV text into rows, rejecting the whole batch on any error
pub fn parse_csv(text: &str) -> BudgetMateResult<Vec<ParsedRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut line = 0;
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let at = e.position().map_or(line + 1, |p| p.line() as usize);
            BudgetMateError::import(at, e.to_string())
        })?;
        if is_blank(&record) {
            continue;
        }
        line += 1;

        if line == 1 {
            check_header(&record)?;
            continue;
        }
        rows.push(parse_row(&record, line)?);
    }

    if line < 2 {
        return Err(BudgetMateError::Validation(
            "CSV file has no data rows".into(),
        ));
    }
    Ok(rows)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn check_header(record: &StringRecord) -> BudgetMateResult<()> {
    let header = record.iter().collect::<Vec<_>>().join(",");
    if header.trim().to_lowercase() != SIMPLE_HEADER {
        return Err(BudgetMateError::import(
            1,
            format!("Invalid CSV header. Expected: {}", SIMPLE_HEADER),
        ));
    }
    Ok(())
}

fn parse_row(record: &StringRecord, line: usize) -> BudgetMateResult<ParsedRow> {
    if record.len() < 3 {
        return Err(BudgetMateError::import(line, "Invalid CSV structure"));
    }
    let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();

    let raw_amount = field(2);
    let amount = Money::parse(&raw_amount).map_err(|e| match e {
        MoneyParseError::InvalidFormat(_) => {
            BudgetMateError::import(line, format!("Invalid amount '{}'", raw_amount))
        }
        MoneyParseError::OutOfRange(_) => BudgetMateError::import(line, e.to_string()),
    })?;

    Ok(ParsedRow {
        line,
        date: field(0),
        category: field(1),
        amount,
        note: field(3),
    })
}

/// Service for CSV import
pub struct ImportService<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Import CSV text
    pub fn import_str(&self, text: &str, mode: ImportMode) -> BudgetMateResult<ImportResult> {
        let rows = parse_csv(text)?;
        let imported = rows.len();

        let (mut expenses, mut categories) = match mode {
            ImportMode::Overwrite => (Vec::new(), CategoryList::new()),
            ImportMode::Append => (self.store.expenses(), self.store.categories()),
        };
        if mode == ImportMode::Append {
            for expense in &expenses {
                categories.canonicalize(&expense.category);
            }
        }

        expenses.reserve(imported);
        for row in rows {
            let category = categories.canonicalize(&row.category);
            expenses.push(Expense::new(row.date, row.amount, category, row.note));
        }

        self.store.put_expenses(&expenses)?;
        self.store.put_categories(&categories)?;

        tracing::info!(
            mode = %mode,
            imported,
            total = expenses.len(),
            "Imported expenses from CSV"
        );

        Ok(ImportResult {
            mode,
            imported,
            total: expenses.len(),
            categories: categories.len(),
        })
    }

    /// Import a CSV file from disk
    pub fn import_file(&self, path: &Path, mode: ImportMode) -> BudgetMateResult<ImportResult> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BudgetMateError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.import_str(&text, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const SAMPLE: &str = "date,category,amount,note\n\
        2024-03-01,Food,10.00,lunch\n\
        \n\
        2024-03-02,food,20.5,\n\
        2024-03-15,Transport,5,bus\n";

    fn snapshot(store: &MemoryStore) -> Vec<(String, String, Money, String)> {
        store
            .expenses()
            .into_iter()
            .map(|e| (e.date, e.category, e.amount, e.note))
            .collect()
    }

    #[test]
    fn test_parse_rows() {
        let rows = parse_csv(SAMPLE).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[1].amount, Money::from_cents(2050));
        assert_eq!(rows[2].note, "bus");
    }

    #[test]
    fn test_header_is_case_insensitive_but_exact() {
        assert!(parse_csv("DATE,Category,AMOUNT,note\n2024-03-01,Food,1,\n").is_ok());

        let err = parse_csv("date;category;amount;note\n2024-03-01;Food;1;\n").unwrap_err();
        assert!(matches!(err, BudgetMateError::Import { line: 1, .. }));
    }

    #[test]
    fn test_header_only_has_no_rows() {
        let err = parse_csv("date,category,amount,note\n\n").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_short_row_reports_line() {
        let text = "date,category,amount,note\n2024-03-01,Food,1,\n\n2024-03-02,Food\n";
        let err = parse_csv(text).unwrap_err();
        assert_eq!(err.to_string(), "Import error in line 3: Invalid CSV structure");
    }

    #[test]
    fn test_bad_amount_reports_line() {
        let text = "date,category,amount,note\n2024-03-01,Food,abc,\n";
        let err = parse_csv(text).unwrap_err();
        assert!(matches!(err, BudgetMateError::Import { line: 2, .. }));

        let text = "date,category,amount,note\n2024-03-01,Food,NaN,\n";
        assert!(parse_csv(text).is_err());
    }

    #[test]
    fn test_amount_over_limit_reports_line() {
        let text = "date,category,amount,note
            2024-03-01,Food,90000000000000000,
            2024-03-02,Food,90000000000000000,
";
        let err = parse_csv(text).unwrap_err();
        assert!(matches!(err, BudgetMateError::Import { line: 2, .. }));
        assert!(err.to_string().contains("exceeds the limit"));

        let store = MemoryStore::new();
        assert!(ImportService::new(&store)
            .import_str(text, ImportMode::Overwrite)
            .is_err());
        assert!(store.expenses().is_empty());
    }

    #[test]
    fn test_quotes_are_plain_text() {
        let text = r#"date,category,amount,note
2024-03-01,"Food",4,"best" pizza
"#;
        let rows = parse_csv(text).unwrap();
        assert_eq!(rows[0].category, "\"Food\"");
        assert_eq!(rows[0].note, "\"best\" pizza");
    }

    #[test]
    fn test_overwrite_canonicalizes_and_rebuilds_categories() {
        let store = MemoryStore::with_expenses(vec![Expense::new(
            "2023-01-01",
            Money::from_units(1),
            "Old",
            "",
        )]);
        let result = ImportService::new(&store)
            .import_str(SAMPLE, ImportMode::Overwrite)
            .unwrap();

        assert_eq!(result.imported, 3);
        assert_eq!(result.total, 3);
        let categories: Vec<_> = store.expenses().into_iter().map(|e| e.category).collect();
        assert_eq!(categories, vec!["Food", "Food", "Transport"]);
        assert_eq!(store.categories().names(), &["Food", "Transport"]);
    }

    #[test]
    fn test_overwrite_is_idempotent() {
        let store = MemoryStore::new();
        let service = ImportService::new(&store);
        service.import_str(SAMPLE, ImportMode::Overwrite).unwrap();
        let once = snapshot(&store);
        service.import_str(SAMPLE, ImportMode::Overwrite).unwrap();
        assert_eq!(snapshot(&store), once);
    }

    #[test]
    fn test_append_keeps_existing_and_their_casing() {
        let store = MemoryStore::with_expenses(vec![Expense::new(
            "2024-02-01",
            Money::from_units(7),
            "food",
            "",
        )]);
        let result = ImportService::new(&store)
            .import_str(SAMPLE, ImportMode::Append)
            .unwrap();

        assert_eq!(result.total, 4);
        let categories: Vec<_> = store.expenses().into_iter().map(|e| e.category).collect();
        assert_eq!(categories, vec!["food", "food", "food", "Transport"]);
    }

    #[test]
    fn test_failed_import_leaves_data_untouched() {
        let original = vec![Expense::new("2024-02-01", Money::from_units(7), "Food", "")];
        let store = MemoryStore::with_expenses(original.clone());
        let bad = "date,category,amount,note\n2024-03-01,Food,1,\n2024-03-02,Food,x,\n";

        assert!(ImportService::new(&store)
            .import_str(bad, ImportMode::Overwrite)
            .is_err());
        assert_eq!(store.expenses(), original);
    }
}
