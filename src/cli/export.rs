//! CLI command for CSV export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::{BudgetMateError, BudgetMateResult};
use crate::export::{export_rich_csv, export_simple_csv};
use crate::models::expense::sort_by_date;
use crate::models::Calendar;
use crate::services::apply_filter;
use crate::storage::RecordStore;

use super::filter::FilterArgs;

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Semicolon-delimited, quoted export of the filtered view
    #[arg(long)]
    pub rich: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Filter for the rich export
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle `export`
pub fn handle_export_command(
    store: &dyn RecordStore,
    calendar: &Calendar,
    args: ExportArgs,
) -> BudgetMateResult<()> {
    let expenses = if args.rich {
        let filter = args.filter.to_filter(calendar)?;
        let mut filtered = apply_filter(&store.expenses(), &filter, calendar)?;
        sort_by_date(&mut filtered);
        filtered
    } else {
        store.expenses()
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BudgetMateError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            let rows = write_export(&expenses, args.rich, &mut writer)?;
            writer
                .flush()
                .map_err(|e| BudgetMateError::Export(e.to_string()))?;
            println!("Exported {} expense(s) to: {}", rows, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_export(&expenses, args.rich, &mut handle)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    expenses: &[crate::models::Expense],
    rich: bool,
    writer: &mut W,
) -> BudgetMateResult<usize> {
    if rich {
        export_rich_csv(expenses, writer)
    } else {
        export_simple_csv(expenses, writer)
    }
}
