//! Budget CLI commands
//!
//! Show, set and clear the daily or monthly budget.

use clap::Subcommand;

use crate::display::format_budget_overview;
use crate::error::BudgetMateResult;
use crate::models::{Calendar, Money};
use crate::services::BudgetService;
use crate::storage::RecordStore;

use super::parse_amount;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show budgets and this month's standing
    Show,

    /// Set the daily or the monthly budget (setting one clears the other)
    Set {
        /// Daily budget amount
        #[arg(long, value_parser = parse_amount)]
        daily: Option<Money>,

        /// Monthly budget amount
        #[arg(long, value_parser = parse_amount)]
        monthly: Option<Money>,
    },

    /// Remove both budgets
    Clear,
}

/// Handle a budget command
pub fn handle_budget_command(
    store: &dyn RecordStore,
    calendar: &Calendar,
    cmd: BudgetCommands,
) -> BudgetMateResult<()> {
    let service = BudgetService::new(store);

    match cmd {
        BudgetCommands::Show => {
            let symbol = store.settings().currency_symbol;
            print!("{}", format_budget_overview(&service.overview(calendar)?, &symbol));
        }

        BudgetCommands::Set { daily, monthly } => {
            let settings = service.set_budgets(daily, monthly)?;
            let symbol = &settings.currency_symbol;
            match (settings.daily(), settings.monthly()) {
                (Some(amount), _) => {
                    println!("Daily budget set to {}", amount.format_with_symbol(symbol))
                }
                (_, Some(amount)) => {
                    println!("Monthly budget set to {}", amount.format_with_symbol(symbol))
                }
                (None, None) => {}
            }
        }

        BudgetCommands::Clear => {
            service.clear()?;
            println!("Budgets cleared");
        }
    }

    Ok(())
}
