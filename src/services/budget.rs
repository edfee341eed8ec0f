//! Budget service
//!
//! Getters and setters for the daily and monthly budget, plus the overview
//! shown by `budget show`. The two budgets are mutually exclusive: setting
//! both at once is rejected and setting one clears the other.

use crate::config::Settings;
use crate::error::{BudgetMateError, BudgetMateResult};
use crate::models::{Calendar, FilterState, Money, Period};
use crate::reports::{
    cumulative_to_date, period_verdict, remaining_this_month, CumulativeVerdict, Remaining,
    Verdict,
};
use crate::storage::RecordStore;

use super::filter::apply_filter;

/// Which budget a setter targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetKind {
    Daily,
    Monthly,
}

/// Budget state for the current month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetOverview {
    pub daily: Option<Money>,
    pub monthly: Option<Money>,
    pub month_verdict: Verdict,
    pub remaining: Option<Remaining>,
    pub cumulative: Option<CumulativeVerdict>,
}

/// Service for budget management
pub struct BudgetService<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    pub fn daily_budget(&self) -> Option<Money> {
        self.store.settings().daily()
    }

    pub fn monthly_budget(&self) -> Option<Money> {
        self.store.settings().monthly()
    }

    /// Set budgets from user input
    ///
    /// At most one of `daily` and `monthly` may be given. The one that is set
    /// replaces any existing budget of the other kind.
    pub fn set_budgets(
        &self,
        daily: Option<Money>,
        monthly: Option<Money>,
    ) -> BudgetMateResult<Settings> {
        match (daily, monthly) {
            (Some(_), Some(_)) => Err(BudgetMateError::Validation(
                "Please set either a daily or a monthly budget, not both".into(),
            )),
            (Some(amount), None) => self.set(BudgetKind::Daily, amount),
            (None, Some(amount)) => self.set(BudgetKind::Monthly, amount),
            (None, None) => Err(BudgetMateError::Validation(
                "Please enter a daily or a monthly budget".into(),
            )),
        }
    }

    /// Set one budget, clearing the other
    pub fn set(&self, kind: BudgetKind, amount: Money) -> BudgetMateResult<Settings> {
        if !amount.is_positive() {
            return Err(BudgetMateError::Validation(format!(
                "Budget must be greater than zero (got {})",
                amount
            )));
        }

        let mut settings = self.store.settings();
        let (target, other, other_name) = match kind {
            BudgetKind::Daily => (
                &mut settings.daily_budget,
                &mut settings.monthly_budget,
                "monthly",
            ),
            BudgetKind::Monthly => (
                &mut settings.monthly_budget,
                &mut settings.daily_budget,
                "daily",
            ),
        };
        *target = Some(amount);
        if let Some(previous) = other.take() {
            tracing::warn!(
                cleared = other_name,
                previous = %previous,
                "Budgets are exclusive, clearing the other one"
            );
        }

        self.store.put_settings(&settings)?;
        tracing::info!(kind = ?kind, amount = %amount, "Budget updated");
        Ok(settings)
    }

    /// Remove both budgets
    pub fn clear(&self) -> BudgetMateResult<Settings> {
        let mut settings = self.store.settings();
        settings.daily_budget = None;
        settings.monthly_budget = None;
        self.store.put_settings(&settings)?;
        tracing::info!("Budgets cleared");
        Ok(settings)
    }

    /// Budget state for the real current month
    pub fn overview(&self, calendar: &Calendar) -> BudgetMateResult<BudgetOverview> {
        let settings = self.store.settings();
        let expenses = self.store.expenses();
        let month = apply_filter(
            &expenses,
            &FilterState::new().with_period(Period::Month),
            calendar,
        )?;
        let total: Money = month.iter().map(|e| e.amount).sum();

        Ok(BudgetOverview {
            daily: settings.daily(),
            monthly: settings.monthly(),
            month_verdict: period_verdict(total, Period::Month, &settings, calendar, 0)?,
            remaining: remaining_this_month(&expenses, &settings, calendar),
            cumulative: cumulative_to_date(&expenses, &settings, calendar, 0)?,
        })
    }
}
