//! Insights Engine - derives budgeting metrics from transactions and settings

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::calendar::{self, DateRange};
use crate::config::InsightsConfig;
use crate::models::{Settings, Transaction};
use crate::money::saturating_sum;

use super::types::AllInsights;

/// Pure insights calculator over one snapshot of a user's data
///
/// Holds the transactions, the settings and a single injected `today`. Every
/// method is a deterministic function of those three (plus the tuning
/// config): nothing is cached between calls and no clock is read, so the
/// engine can be shared freely and tested with a fixed date.
#[derive(Debug, Clone)]
pub struct InsightsEngine<'a> {
    transactions: &'a [Transaction],
    settings: &'a Settings,
    today: NaiveDate,
    config: InsightsConfig,
}

impl<'a> InsightsEngine<'a> {
    /// Create an engine with the default tuning config
    pub fn new(transactions: &'a [Transaction], settings: &'a Settings, today: NaiveDate) -> Self {
        Self {
            transactions,
            settings,
            today,
            config: InsightsConfig::default(),
        }
    }

    /// Replace the tuning config
    pub fn with_config(mut self, config: InsightsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Total expenses in the calendar month `offset` months from today
    pub fn month_spend(&self, offset: i32) -> Decimal {
        let range = calendar::month_range(self.today, offset);
        saturating_sum(self.expenses_in(range).map(|t| t.amount))
    }

    /// Compose every insight into one result
    pub fn all_insights(&self, budgets: &BTreeMap<String, Decimal>) -> AllInsights {
        let insights = AllInsights {
            daily_limit: self.daily_spending_limit(),
            comparison: self.period_comparison(),
            forecast: self.month_end_forecast(),
            overspending: self.category_overspending(budgets),
            streak: self.spending_streak(),
            top_spending: self.top_spending_insights(),
            savings_opportunity: self.savings_opportunities(),
            recurring_expenses: self.recurring_expenses(),
            automatic_insights: self.automatic_insights(),
        };

        tracing::debug!(
            today = %self.today,
            transactions = self.transactions.len(),
            overspending = insights.overspending.len(),
            cards = insights.automatic_insights.len(),
            "Insights computed"
        );

        insights
    }

    /// Expense transactions dated inside `range`
    pub(crate) fn expenses_in(&self, range: DateRange) -> impl Iterator<Item = &'a Transaction> {
        let transactions = self.transactions;
        transactions.iter().filter(move |t| {
            t.is_expense() && t.date.is_some_and(|date| range.contains(date))
        })
    }

    /// Expense transactions dated in the current month
    pub(crate) fn current_month_expenses(&self) -> impl Iterator<Item = &'a Transaction> {
        self.expenses_in(self.current_month())
    }

    pub(crate) fn current_month(&self) -> DateRange {
        calendar::month_range(self.today, 0)
    }

    pub(crate) fn days_in_month(&self) -> u32 {
        calendar::days_in_month(self.today)
    }

    pub(crate) fn current_day(&self) -> u32 {
        self.today.day()
    }
}
