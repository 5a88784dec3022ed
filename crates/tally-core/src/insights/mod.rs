//! Insights Engine - budgeting metrics derived from transactions and settings
//!
//! The engine is a set of pure calculations over one snapshot of a user's
//! data and a single injected "today". It never reads a clock, performs I/O
//! or mutates its inputs, so it can be called from anywhere without locking.
//!
//! ## Insights
//!
//! - **Daily spending limit** - flat and remaining daily allowance
//! - **Period comparison** - this month's spending vs last month's
//! - **Month-end forecast** - linear projection with a worst case
//! - **Category overspending** - budgets at or past their warning level
//! - **Spending streak** - consecutive days within the daily limit
//! - **Top spending** - most expensive day and category
//! - **Savings opportunity** - what trimming the top category would save
//! - **Recurring expenses** - repeated similar expenses this month
//! - **Automatic insights** - prioritized natural-language cards
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::InsightsEngine;
//!
//! let engine = InsightsEngine::new(&transactions, &settings, today);
//! let insights = engine.all_insights(&settings.budgets);
//! ```

pub mod engine;
mod feed;
mod overspending;
mod recurring;
mod spending;
mod streak;
mod top_spending;
pub mod types;

#[cfg(test)]
mod test_support;

pub use engine::InsightsEngine;
pub use types::{
    AllInsights, BudgetStatus, CategoryOverspend, DailyLimitFormula, DailySpendingLimit,
    ForecastScenario, InsightCard, InsightKind, MonthEndForecast, PeriodComparison, Priority,
    RecurringExpense, SavingsOpportunity, SpendingStreak, TopCategory, TopDay, TopSpending, Trend,
};
