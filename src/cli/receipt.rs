//! CLI command for receipt text parsing

use std::io::Read;

use clap::Args;

use crate::error::{BudgetMateError, BudgetMateResult};
use crate::models::Calendar;
use crate::services::{parse_receipt, ExpenseService, NewExpense};
use crate::storage::RecordStore;

/// Arguments for `receipt`
#[derive(Args, Debug)]
pub struct ReceiptArgs {
    /// Receipt text (e.g., OCR output); "-" reads stdin
    pub text: String,

    /// Add the guessed expense under this category
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Handle `receipt`
pub fn handle_receipt_command(
    store: &dyn RecordStore,
    calendar: &Calendar,
    args: ReceiptArgs,
) -> BudgetMateResult<()> {
    let text = if args.text == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        args.text
    };

    let symbol = store.settings().currency_symbol;
    let guess = parse_receipt(&text, calendar);
    match guess.amount {
        Some(amount) => println!("Amount: {}", amount.format_with_symbol(&symbol)),
        None => println!("Amount: not found"),
    }
    match &guess.date {
        Some(date) => println!("Date:   {}", date),
        None => println!("Date:   not found"),
    }

    let Some(category) = args.category else {
        return Ok(());
    };
    let amount = guess.amount.ok_or_else(|| {
        BudgetMateError::Validation("No amount found on the receipt; nothing was added".into())
    })?;
    let expense = ExpenseService::new(store).add(NewExpense {
        date: guess.date.unwrap_or_else(|| calendar.today_key()),
        amount,
        category,
        note: "receipt".to_string(),
    })?;
    println!(
        "Added {} on {} to {} ({})",
        expense.amount.format_with_symbol(&symbol),
        expense.date,
        expense.category,
        expense.id.short()
    );
    Ok(())
}
