//! Output types for the Insights Engine

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Every intermediate value behind the daily spending limit
///
/// Values here are unclamped, so a consumer can show exactly how the
/// (clamped) figures in [`DailySpendingLimit`] were reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLimitFormula {
    pub monthly_income: Decimal,
    pub fixed_expenses: Decimal,
    pub available_for_month: Decimal,
    pub days_in_month: u32,
    pub current_day: u32,
    pub daily_limit: Decimal,
    pub current_spending: Decimal,
    pub remaining_for_month: Decimal,
    pub days_remaining: u32,
    pub daily_remaining: Decimal,
}

/// Daily allowance derived from income, fixed costs and this month's spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySpendingLimit {
    /// Flat allowance: available for the month spread over all its days
    pub daily_limit: Decimal,
    /// What is left for the month spread over the remaining days (today included)
    pub daily_remaining: Decimal,
    pub remaining_for_month: Decimal,
    /// Days left in the month, today included
    pub days_remaining: u32,
    pub formula: DailyLimitFormula,
}

/// Direction of month-over-month spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Same,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Same => "same",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current month's spending against the previous month's
///
/// `percentage` is 0 whenever `previous` is 0, whatever `current` is. Check
/// `previous > 0` before building percentage-based messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub current: Decimal,
    pub previous: Decimal,
    pub difference: Decimal,
    pub percentage: Decimal,
    pub trend: Trend,
}

/// Month-end outlook bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastScenario {
    Positive,
    Warning,
    Negative,
}

impl ForecastScenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastScenario::Positive => "positive",
            ForecastScenario::Warning => "warning",
            ForecastScenario::Negative => "negative",
        }
    }
}

impl fmt::Display for ForecastScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Linear extrapolation of the current spending pace to the end of the month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthEndForecast {
    pub forecast_balance: Decimal,
    pub projected_spending: Decimal,
    pub worst_case_balance: Decimal,
    pub current_spending: Decimal,
    pub monthly_income: Decimal,
    pub fixed_expenses: Decimal,
    /// Days left after today
    pub days_remaining: u32,
    pub avg_daily_spending: Decimal,
    pub scenario: ForecastScenario,
}

/// How close a category is to its budget cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Ok,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Ok => "ok",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Over => "over",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A budget category at or past its warning level this month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOverspend {
    pub category: String,
    pub spent: Decimal,
    pub budget: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub status: BudgetStatus,
    /// The cap is 0 and money was spent anyway; `percentage` is saturated
    pub zero_budget: bool,
}

/// Consecutive days this month spent within the flat daily limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingStreak {
    pub days: u32,
    pub is_active: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDay {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategory {
    pub name: String,
    pub amount: Decimal,
}

/// Most expensive day and category of the current month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSpending {
    pub top_day: Option<TopDay>,
    pub top_category: Option<TopCategory>,
}

/// What trimming the top category would save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsOpportunity {
    pub category: String,
    pub current: Decimal,
    pub if_reduce_10: Decimal,
    pub if_reduce_20: Decimal,
    pub message: String,
}

/// Expenses of roughly the same amount in the same category, seen repeatedly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub category: String,
    /// Bucket amount (rounded to the configured step)
    pub amount: Decimal,
    pub count: usize,
    /// Exact sum of the bucketed expenses
    pub total: Decimal,
}

/// Visual tone of an insight card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Danger,
    Success,
    Info,
    Opportunity,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Danger => "danger",
            InsightKind::Success => "success",
            InsightKind::Info => "info",
            InsightKind::Opportunity => "opportunity",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority of an insight card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Numeric weight for sorting (higher = shown first)
    pub fn weight(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// A natural-language insight card for the automatic feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightCard {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
}

impl InsightCard {
    pub fn new(
        kind: InsightKind,
        priority: Priority,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            priority,
        }
    }
}

/// Everything the dashboard shows, derived in one go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllInsights {
    pub daily_limit: DailySpendingLimit,
    pub comparison: PeriodComparison,
    pub forecast: MonthEndForecast,
    pub overspending: Vec<CategoryOverspend>,
    pub streak: SpendingStreak,
    pub top_spending: TopSpending,
    pub savings_opportunity: Option<SavingsOpportunity>,
    pub recurring_expenses: Vec<RecurringExpense>,
    pub automatic_insights: Vec<InsightCard>,
}
