use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use budgetmate::cli::{
    handle_add_command, handle_budget_command, handle_category_command, handle_clear_command,
    handle_delete_command, handle_export_command, handle_import_command, handle_list_command,
    handle_receipt_command, handle_report_command, handle_reset_command, AddArgs,
    BudgetCommands, CategoryCommands, ExportArgs, ListArgs, ReceiptArgs, ReportCommands,
};
use budgetmate::config::paths::DATA_DIR_ENV;
use budgetmate::config::BudgetMatePaths;
use budgetmate::models::Calendar;
use budgetmate::storage::{JsonStore, RecordStore};

#[derive(Parser)]
#[command(
    name = "budgetmate",
    version,
    about = "Track daily expenses against a daily or monthly budget",
    long_about = "BudgetMate records expenses, filters them by period and category, \
                  charts where the money went, and tells you whether you are under \
                  or over your daily or monthly budget."
)]
struct Cli {
    /// Directory holding settings and data files
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an expense
    Add(AddArgs),

    /// Delete an expense by ID (full or short form)
    #[command(alias = "rm")]
    Delete {
        /// Expense ID as shown by 'list'
        id: String,
    },

    /// List expenses matching a filter
    #[command(alias = "ls")]
    List(ListArgs),

    /// Delete all expenses, keeping categories and settings
    Clear,

    /// Delete expenses and categories
    Reset {
        /// Also reset settings and budgets
        #[arg(long)]
        all: bool,
    },

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reports and chart data
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export expenses as CSV
    Export(ExportArgs),

    /// Import expenses from a date,category,amount,note CSV file
    Import {
        /// Path to CSV file
        file: PathBuf,
        /// Keep existing expenses and add the imported ones
        #[arg(long)]
        append: bool,
    },

    /// Guess amount and date from receipt text
    Receipt(ReceiptArgs),

    /// Show or change configuration
    Config {
        /// Currency symbol shown after amounts
        #[arg(long)]
        currency: Option<String>,
        /// Dark mode preference
        #[arg(long)]
        dark_mode: Option<bool>,
    },
}

fn main() -> Result<()> {
    budgetmate::logging::init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BudgetMatePaths::with_base_dir(dir),
        None => BudgetMatePaths::new()?,
    };
    let store = JsonStore::new(paths.clone())?;
    let calendar = Calendar::local();

    match cli.command {
        Some(Commands::Add(args)) => handle_add_command(&store, &calendar, args)?,
        Some(Commands::Delete { id }) => handle_delete_command(&store, &id)?,
        Some(Commands::List(args)) => handle_list_command(&store, &calendar, args)?,
        Some(Commands::Clear) => handle_clear_command(&store)?,
        Some(Commands::Reset { all }) => handle_reset_command(&store, all)?,
        Some(Commands::Category(cmd)) => handle_category_command(&store, &calendar, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&store, &calendar, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&store, &calendar, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&store, &calendar, args)?,
        Some(Commands::Import { file, append }) => handle_import_command(&store, &file, append)?,
        Some(Commands::Receipt(args)) => handle_receipt_command(&store, &calendar, args)?,
        Some(Commands::Config { currency, dark_mode }) => {
            let mut settings = store.settings();
            if currency.is_some() || dark_mode.is_some() {
                if let Some(symbol) = currency {
                    settings.currency_symbol = symbol;
                }
                if let Some(dark) = dark_mode {
                    settings.dark_mode = dark;
                }
                store.put_settings(&settings)?;
                println!("Settings updated.");
                println!();
            }

            println!("BudgetMate Configuration");
            println!("========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Dark mode:       {}", settings.dark_mode);
            let budget = |m: Option<budgetmate::models::Money>| {
                m.map_or_else(
                    || "not set".to_string(),
                    |m| m.format_with_symbol(&settings.currency_symbol),
                )
            };
            println!("  Daily budget:    {}", budget(settings.daily()));
            println!("  Monthly budget:  {}", budget(settings.monthly()));
        }
        None => {
            println!("BudgetMate - Daily expense tracking");
            println!();
            println!("Run 'budgetmate --help' for usage information.");
            println!("Run 'budgetmate add 12.50 Food' to record your first expense.");
        }
    }

    Ok(())
}
