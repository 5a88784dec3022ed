//! Persistence contracts
//!
//! The insights engine only ever sees a snapshot; these traits describe the
//! get/save/delete surface a backend has to offer to produce one. Every call
//! is scoped to a user id.

mod memory;

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    Category, Goal, NewCategory, NewGoal, NewTransaction, Settings, SettingsPatch, Transaction,
    TransactionRecord,
};

pub use memory::MemoryStore;

/// Source of a user's transactions
pub trait TransactionStore: Send + Sync {
    /// All transactions, newest first (by date, then creation time)
    fn load_transactions(&self, user: &str) -> Result<Vec<Transaction>>;
    /// Store a new transaction, assigning an id and creation time when absent
    fn save_transaction(&self, user: &str, tx: NewTransaction) -> Result<Transaction>;
    /// Fails with `NotFound` for an unknown id
    fn delete_transaction(&self, user: &str, id: &str) -> Result<()>;
}

/// Source of a user's budgeting profile
pub trait SettingsStore: Send + Sync {
    /// Stored settings, or the defaults when the user has none yet
    fn load_settings(&self, user: &str) -> Result<Settings>;
    /// Merge `patch` into the stored settings and return the result
    fn save_settings(&self, user: &str, patch: SettingsPatch) -> Result<Settings>;
    /// Record the onboarding answers and mark onboarding complete
    ///
    /// Category budgets are cleared: they are set up again after onboarding.
    fn complete_onboarding(
        &self,
        user: &str,
        monthly_income: Decimal,
        fixed_expenses: Decimal,
        financial_goal: Option<String>,
    ) -> Result<Settings>;
}

/// Source of a user's savings goals
pub trait GoalStore: Send + Sync {
    fn load_goals(&self, user: &str) -> Result<Vec<Goal>>;
    /// Insert, or update the goal with the same id
    fn save_goal(&self, user: &str, goal: NewGoal) -> Result<Goal>;
    /// Fails with `NotFound` for an unknown id
    fn delete_goal(&self, user: &str, id: &str) -> Result<()>;
}

/// Source of a user's expense categories
pub trait CategoryStore: Send + Sync {
    /// The user's own categories by name, followed by the defaults
    fn load_categories(&self, user: &str) -> Result<Vec<Category>>;
    /// Insert, or rename the category with the same id
    ///
    /// Fails with `InvalidData` for an empty or already used name, or when
    /// renaming a default category.
    fn save_category(&self, user: &str, category: NewCategory) -> Result<Category>;
    /// Fails with `NotFound` for an unknown id and `InvalidData` for a default
    fn delete_category(&self, user: &str, id: &str) -> Result<()>;
}

/// Everything stored for one user, as kept in a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub settings: Settings,
    pub transactions: Vec<TransactionRecord>,
    pub goals: Vec<Goal>,
    /// The user's own categories; defaults are never stored
    pub categories: Vec<Category>,
}

impl Snapshot {
    /// Read a snapshot file; a missing file is an empty snapshot
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No snapshot file, starting empty");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            goals = snapshot.goals.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "Saved snapshot");
        Ok(())
    }
}

/// Order transactions newest first: by date, then by creation time
///
/// Undated transactions sort last.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(newest_first);
}

fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    let a_key = (a.date.unwrap_or(NaiveDate::MIN), a.created_at);
    let b_key = (b.date.unwrap_or(NaiveDate::MIN), b.created_at);
    b_key.cmp(&a_key)
}
