//! CLI command handler for CSV import

use std::path::Path;

use crate::error::BudgetMateResult;
use crate::services::{ImportMode, ImportService};
use crate::storage::RecordStore;

/// Handle `import`
pub fn handle_import_command(
    store: &dyn RecordStore,
    file: &Path,
    append: bool,
) -> BudgetMateResult<()> {
    let mode = if append {
        ImportMode::Append
    } else {
        ImportMode::Overwrite
    };
    let result = ImportService::new(store).import_file(file, mode)?;

    match result.mode {
        ImportMode::Overwrite => println!(
            "Imported {} expense(s), replacing existing data.",
            result.imported
        ),
        ImportMode::Append => println!(
            "Appended {} expense(s); {} stored in total.",
            result.imported, result.total
        ),
    }
    println!("{} categories known.", result.categories);
    Ok(())
}
