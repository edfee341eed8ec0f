//! Expense CLI commands
//!
//! Top-level `add`, `delete`, `list`, `clear` and `reset` commands.

use clap::Args;

use crate::display::{format_expense_table, format_filter_summary};
use crate::error::BudgetMateResult;
use crate::models::expense::total;
use crate::models::{Calendar, Money};
use crate::reports::period_verdict;
use crate::services::{ExpenseService, NewExpense, ResetScope};
use crate::storage::RecordStore;

use super::filter::FilterArgs;
use super::parse_amount;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount (e.g., "12.50" or "12,50")
    #[arg(value_parser = parse_amount)]
    pub amount: Money,

    /// Category name
    pub category: String,

    /// Expense date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Free-text note
    #[arg(short, long, default_value = "")]
    pub note: String,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print the filtered expenses as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle `add`
pub fn handle_add_command(
    store: &dyn RecordStore,
    calendar: &Calendar,
    args: AddArgs,
) -> BudgetMateResult<()> {
    let settings = store.settings();
    let expense = ExpenseService::new(store).add(NewExpense {
        date: args.date.unwrap_or_else(|| calendar.today_key()),
        amount: args.amount,
        category: args.category,
        note: args.note,
    })?;

    println!(
        "Added {} on {} to {} ({})",
        expense.amount.format_with_symbol(&settings.currency_symbol),
        expense.date,
        expense.category,
        expense.id.short()
    );
    Ok(())
}

/// Handle `delete`
pub fn handle_delete_command(store: &dyn RecordStore, id: &str) -> BudgetMateResult<()> {
    let settings = store.settings();
    let removed = ExpenseService::new(store).delete(id)?;
    println!(
        "Deleted expense {}: {} on {} ({})",
        removed.id.short(),
        removed.amount.format_with_symbol(&settings.currency_symbol),
        removed.date,
        removed.category_label()
    );
    Ok(())
}

/// Handle `list`
pub fn handle_list_command(
    store: &dyn RecordStore,
    calendar: &Calendar,
    args: ListArgs,
) -> BudgetMateResult<()> {
    let settings = store.settings();
    let filter = args.filter.to_filter(calendar)?;
    let expenses = ExpenseService::new(store).filtered(&filter, calendar)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&expenses)?);
        return Ok(());
    }

    let verdict = period_verdict(
        total(&expenses),
        filter.effective_period(),
        &settings,
        calendar,
        filter.month_offset(),
    )?;
    println!("{}", format_expense_table(&expenses, &settings.currency_symbol));
    println!();
    println!(
        "{}",
        format_filter_summary(&filter, calendar, &verdict, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle `clear`
pub fn handle_clear_command(store: &dyn RecordStore) -> BudgetMateResult<()> {
    let count = ExpenseService::new(store).clear_all()?;
    println!("Deleted {} expense(s). Categories and settings were kept.", count);
    Ok(())
}

/// Handle `reset`
pub fn handle_reset_command(store: &dyn RecordStore, all: bool) -> BudgetMateResult<()> {
    let scope = if all {
        ResetScope::Everything
    } else {
        ResetScope::Data
    };
    ExpenseService::new(store).reset(scope)?;
    match scope {
        ResetScope::Everything => println!("All expenses, categories and settings were reset."),
        ResetScope::Data => {
            println!("All expenses and categories were deleted. Settings were kept.")
        }
    }
    Ok(())
}
