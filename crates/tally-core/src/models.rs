//! Domain models for Tally

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::money::{is_valid_amount, parse_amount, percent_of, MAX_AMOUNT};

/// Category assigned to expenses recorded without one
pub const OTHER_CATEGORY: &str = "Other";

/// Date format used by stores and snapshot files
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense event, already normalized
///
/// `amount` is never negative. Expenses always carry a category (`Other` when
/// none was given). `date` is `None` when the source date could not be
/// parsed; such transactions are left out of every date-bucketed figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub category: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

/// A transaction as handed over by an external store
///
/// Every field is optional and loosely typed. [`TransactionRecord::normalize`]
/// turns it into a [`Transaction`], repairing what it can.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TransactionRecord {
    /// Fill in a missing id derived from the record and its `position` in
    /// the source
    ///
    /// The same file always yields the same ids, so an id shown once can be
    /// used to address the record on a later run.
    pub fn with_stable_id(mut self, position: usize) -> Self {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            let content = serde_json::to_string(&self).unwrap_or_default();
            let seed = format!("{}:{}", position, content);
            let id = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, seed.as_bytes());
            self.id = Some(id.to_string());
        }
        self
    }

    /// Normalize into a [`Transaction`]
    ///
    /// - missing, unparseable, negative or oversized amount becomes 0
    /// - an expense with an empty category becomes `Other`
    /// - a malformed date becomes `None`
    ///
    /// Only an unknown transaction type is rejected, since such a record can
    /// be neither an expense nor an income.
    pub fn normalize(self) -> Result<Transaction> {
        let kind: TransactionType = self
            .kind
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(Error::InvalidData)?;

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let amount = match self.amount.as_ref().and_then(amount_from_json) {
            Some(amount) if is_valid_amount(amount) => amount,
            Some(amount) if amount < Decimal::ZERO => {
                tracing::warn!(id = %id, amount = %amount, "Negative amount treated as 0");
                Decimal::ZERO
            }
            Some(amount) => {
                tracing::warn!(id = %id, amount = %amount, "Amount out of range treated as 0");
                Decimal::ZERO
            }
            None => {
                tracing::warn!(id = %id, "Missing or invalid amount treated as 0");
                Decimal::ZERO
            }
        };

        let date = match self.date.as_deref().map(str::trim) {
            Some(raw) => match parse_date(raw) {
                Some(date) => Some(date),
                None => {
                    tracing::warn!(id = %id, date = raw, "Malformed transaction date");
                    None
                }
            },
            None => None,
        };

        let category = normalize_category(kind, self.category.as_deref());

        let created_at = self
            .created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_default();

        Ok(Transaction {
            id,
            kind,
            amount,
            date,
            category,
            description: self.description.filter(|d| !d.trim().is_empty()),
            created_at,
        })
    }
}

impl From<&Transaction> for TransactionRecord {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: Some(tx.id.clone()),
            kind: Some(tx.kind.as_str().to_string()),
            // strings keep the exact decimal value
            amount: Some(serde_json::Value::String(tx.amount.to_string())),
            date: tx.date.map(|d| d.format(DATE_FORMAT).to_string()),
            category: Some(tx.category.clone()).filter(|c| !c.is_empty()),
            description: tx.description.clone(),
            created_at: Some(tx.created_at.to_rfc3339()),
        }
    }
}

/// Parse a `YYYY-MM-DD` date, also accepting a trailing time part
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day_part, DATE_FORMAT).ok()
}

fn amount_from_json(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => parse_amount(&n.to_string()),
        serde_json::Value::String(s) => parse_amount(s),
        _ => None,
    }
}

fn check_amount(what: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(Error::InvalidData(format!(
            "{} must not be negative: {}",
            what, value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(Error::InvalidData(format!(
            "{} exceeds the maximum of {}: {}",
            what, MAX_AMOUNT, value
        )));
    }
    Ok(())
}

fn normalize_category(kind: TransactionType, category: Option<&str>) -> String {
    let trimmed = category.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() && kind == TransactionType::Expense {
        OTHER_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// A transaction to be saved; the store assigns `id` and `created_at` when absent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTransaction {
    /// Validate and turn into a stored [`Transaction`]
    pub fn into_transaction(self, now: DateTime<Utc>) -> Result<Transaction> {
        check_amount("Transaction amount", self.amount)?;

        Ok(Transaction {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            kind: self.kind,
            amount: self.amount,
            date: Some(self.date),
            category: normalize_category(self.kind, self.category.as_deref()),
            description: self.description.filter(|d| !d.trim().is_empty()),
            created_at: self.created_at.unwrap_or(now),
        })
    }
}

/// Per-user budgeting profile
///
/// Defaults are applied once, at deserialization time; computations never
/// have to guess at missing fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub monthly_income: Decimal,
    pub fixed_expenses: Decimal,
    /// Monthly spending cap per category
    pub budgets: BTreeMap<String, Decimal>,
    pub financial_goal: Option<String>,
    /// Consumers must send the user through onboarding while this is false
    pub onboarding_completed: bool,
}

impl Settings {
    /// Income left after fixed expenses; may be negative
    pub fn available_for_month(&self) -> Decimal {
        self.monthly_income.saturating_sub(self.fixed_expenses)
    }

    /// Replace negative or out-of-range amounts with zero
    pub fn normalized(mut self) -> Self {
        if !is_valid_amount(self.monthly_income) {
            tracing::warn!(value = %self.monthly_income, "Invalid monthly income treated as 0");
            self.monthly_income = Decimal::ZERO;
        }
        if !is_valid_amount(self.fixed_expenses) {
            tracing::warn!(value = %self.fixed_expenses, "Invalid fixed expenses treated as 0");
            self.fixed_expenses = Decimal::ZERO;
        }
        for (category, cap) in self.budgets.iter_mut() {
            if !is_valid_amount(*cap) {
                tracing::warn!(category = %category, value = %cap, "Invalid budget treated as 0");
                *cap = Decimal::ZERO;
            }
        }
        self
    }

    /// Merge a partial update; fields left `None` keep their current value
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(income) = patch.monthly_income {
            self.monthly_income = income;
        }
        if let Some(fixed) = patch.fixed_expenses {
            self.fixed_expenses = fixed;
        }
        if let Some(budgets) = patch.budgets {
            self.budgets = budgets;
        }
        if let Some(goal) = patch.financial_goal {
            self.financial_goal = Some(goal).filter(|g| !g.trim().is_empty());
        }
        if let Some(completed) = patch.onboarding_completed {
            self.onboarding_completed = completed;
        }
    }
}

/// Partial settings update with merge semantics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub monthly_income: Option<Decimal>,
    pub fixed_expenses: Option<Decimal>,
    /// Replaces the whole budget map when present
    pub budgets: Option<BTreeMap<String, Decimal>>,
    pub financial_goal: Option<String>,
    pub onboarding_completed: Option<bool>,
}

impl SettingsPatch {
    /// Reject negative or out-of-range amounts
    pub fn validate(&self) -> Result<()> {
        if let Some(income) = self.monthly_income {
            check_amount("Monthly income", income)?;
        }
        if let Some(fixed) = self.fixed_expenses {
            check_amount("Fixed expenses", fixed)?;
        }
        for (category, cap) in self.budgets.iter().flatten() {
            check_amount(&format!("Budget for {}", category), *cap)?;
        }
        Ok(())
    }
}

/// Lifecycle state of a savings goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown goal status: {}", s)),
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Progress towards the target, capped at 100; 0 when the target is 0
    pub fn progress_percentage(&self) -> Decimal {
        if self.target_amount > Decimal::ZERO {
            percent_of(self.current_amount, self.target_amount).min(Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        }
    }

    /// Amount still missing to reach the target (never negative)
    pub fn remaining(&self) -> Decimal {
        self.target_amount
            .saturating_sub(self.current_amount)
            .max(Decimal::ZERO)
    }
}

/// A goal to be saved; inserted when `id` is absent or unknown, updated otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<GoalStatus>,
}

impl NewGoal {
    pub fn into_goal(self, now: DateTime<Utc>) -> Result<Goal> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidData("Goal title is required".to_string()));
        }
        check_amount("Goal target", self.target_amount)?;
        check_amount("Goal current amount", self.current_amount)?;

        Ok(Goal {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            title: self.title.trim().to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            deadline: self.deadline,
            status: self.status.unwrap_or_default(),
            created_at: now,
        })
    }
}

/// Expense categories every user starts with
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Groceries",
    "Transport",
    "Entertainment",
    "Health",
    "Utilities",
    "Clothing",
    OTHER_CATEGORY,
];

/// An expense category offered when recording spending
///
/// Default categories are fixed and shared by every user; the rest belong to
/// one user. Names are unique per user, ignoring case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    /// The built-in categories, with ids that never change
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|name| Category {
                id: format!("default-{}", name.to_lowercase()),
                name: name.to_string(),
                is_default: true,
                created_at: None,
            })
            .collect()
    }

    pub fn same_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// A category to be saved; inserted when `id` is absent, renamed otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}
