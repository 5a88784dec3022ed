//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Domain models and lenient normalization of stored records
//! - Insights engine (daily limit, forecast, overspending, streaks, feed)
//! - Savings goal planning and expense categories
//! - Period analytics
//! - Store contracts with an in-memory, snapshot-backed implementation
//! - Tuning config with embedded defaults

pub mod analytics;
pub mod calendar;
pub mod config;
pub mod error;
pub mod goals;
pub mod insights;
pub mod models;
pub mod money;
pub mod store;

pub use analytics::{AnalyticsPeriod, PeriodAnalytics};
pub use config::InsightsConfig;
pub use error::{Error, Result};
pub use goals::{GoalPlanner, GoalProgress, SavingsPlan};
pub use insights::{AllInsights, InsightCard, InsightsEngine};
pub use models::{
    Category, Goal, GoalStatus, NewCategory, NewGoal, NewTransaction, Settings, SettingsPatch,
    Transaction, TransactionRecord, TransactionType,
};
pub use money::format_amount;
pub use store::{
    CategoryStore, GoalStore, MemoryStore, SettingsStore, Snapshot, TransactionStore,
};
