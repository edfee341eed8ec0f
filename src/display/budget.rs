//! Budget display formatting

use crate::services::BudgetOverview;

/// Format the budget overview shown by `budget show`
pub fn format_budget_overview(overview: &BudgetOverview, symbol: &str) -> String {
    let money = |m: crate::models::Money| m.format_with_symbol(symbol);

    if overview.daily.is_none() && overview.monthly.is_none() {
        return format!(
            "No budget set.\nSpent this month: {}\n\n\
             Set one with 'budgetmate budget set --daily <amount>' or '--monthly <amount>'.\n",
            money(overview.month_verdict.total)
        );
    }

    let mut output = String::new();
    if let Some(daily) = overview.daily {
        output.push_str(&format!("Daily budget:   {}\n", money(daily)));
    }
    if let Some(monthly) = overview.monthly {
        output.push_str(&format!("Monthly budget: {}\n", money(monthly)));
    }

    let verdict = &overview.month_verdict;
    output.push_str(&format!("Spent this month: {}", money(verdict.total)));
    if let Some(ceiling) = verdict.ceiling {
        output.push_str(&format!(" of {} ({})", money(ceiling), verdict.describe(symbol)));
    }
    output.push('\n');

    if let Some(remaining) = &overview.remaining {
        output.push_str(&format!(
            "Remaining this month: {} ({})\n",
            money(remaining.amount),
            remaining.method
        ));
    }
    if let Some(cumulative) = &overview.cumulative {
        output.push_str(&format!(
            "Allowed so far ({} days): {} • {}\n",
            cumulative.days,
            money(cumulative.verdict.ceiling.unwrap_or_default()),
            cumulative.verdict.describe(symbol)
        ));
    }
    output
}
