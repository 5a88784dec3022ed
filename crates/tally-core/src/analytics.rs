//! Period analytics: totals, category breakdown and a 30-day series
//!
//! Unlike the insights engine, which always works on calendar months, these
//! figures cover a selectable window ending today.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, DateRange};
use crate::insights::InsightsEngine;
use crate::models::{Settings, Transaction};
use crate::money::{percent_of, round_dp};

/// Length of the daily series, today included
pub const DAILY_SERIES_DAYS: u64 = 30;

/// Window the analytics cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsPeriod {
    #[default]
    All,
    Month,
    Week,
}

impl AnalyticsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Month => "month",
            Self::Week => "week",
        }
    }

    /// Date window ending at `today`; `None` means unbounded
    pub fn window(&self, today: NaiveDate) -> Option<DateRange> {
        match self {
            Self::All => None,
            Self::Month => Some(DateRange::new(calendar::first_day_of_month(today), today)),
            Self::Week => {
                let start = today.checked_sub_days(Days::new(7)).unwrap_or(today);
                Some(DateRange::new(start, today))
            }
        }
    }
}

impl fmt::Display for AnalyticsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalyticsPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            _ => Err(format!("Unknown period: {} (expected all, month or week)", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub expenses: Decimal,
    pub incomes: Decimal,
    pub balance: Decimal,
    pub avg_daily: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub expenses: Decimal,
    pub incomes: Decimal,
}

/// Current month's spending against the previous month's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTrend {
    pub current_month: Decimal,
    pub previous_month: Decimal,
    /// Percentage change, 2 decimal places; 0 without a previous month
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAnalytics {
    pub period: AnalyticsPeriod,
    pub summary: AnalyticsSummary,
    pub categories: Vec<CategoryStat>,
    /// Oldest day first
    pub daily: Vec<DailyTotals>,
    pub trend: MonthTrend,
}

impl PeriodAnalytics {
    /// Compute analytics for `period` ending at `today`
    ///
    /// Undated transactions only count towards the unbounded `all` window.
    pub fn compute(transactions: &[Transaction], today: NaiveDate, period: AnalyticsPeriod) -> Self {
        let window = period.window(today);
        let in_window = |tx: &&Transaction| match window {
            None => true,
            Some(range) => tx.date.is_some_and(|date| range.contains(date)),
        };

        let mut expenses = Decimal::ZERO;
        let mut incomes = Decimal::ZERO;
        let mut by_category: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
        for tx in transactions.iter().filter(in_window) {
            if tx.is_expense() {
                expenses = expenses.saturating_add(tx.amount);
                let entry = by_category
                    .entry(tx.category.as_str())
                    .or_insert((Decimal::ZERO, 0));
                entry.0 = entry.0.saturating_add(tx.amount);
                entry.1 += 1;
            } else {
                incomes = incomes.saturating_add(tx.amount);
            }
        }

        let days = match window {
            Some(range) => (today - range.start).num_days().max(1),
            None => 30,
        };

        let mut categories: Vec<CategoryStat> = by_category
            .into_iter()
            .map(|(category, (total, count))| CategoryStat {
                category: category.to_string(),
                total,
                count,
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        Self {
            period,
            summary: AnalyticsSummary {
                expenses,
                incomes,
                balance: incomes.saturating_sub(expenses),
                avg_daily: round_dp(expenses / Decimal::from(days), 2),
            },
            categories,
            daily: daily_series(transactions, today),
            trend: month_trend(transactions, today),
        }
    }
}

fn daily_series(transactions: &[Transaction], today: NaiveDate) -> Vec<DailyTotals> {
    let start = today
        .checked_sub_days(Days::new(DAILY_SERIES_DAYS - 1))
        .unwrap_or(today);

    let mut days: BTreeMap<NaiveDate, DailyTotals> = start
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| {
            (
                date,
                DailyTotals {
                    date,
                    expenses: Decimal::ZERO,
                    incomes: Decimal::ZERO,
                },
            )
        })
        .collect();

    for tx in transactions {
        let Some(date) = tx.date else { continue };
        let Some(totals) = days.get_mut(&date) else {
            continue;
        };
        if tx.is_expense() {
            totals.expenses = totals.expenses.saturating_add(tx.amount);
        } else {
            totals.incomes = totals.incomes.saturating_add(tx.amount);
        }
    }

    days.into_values().collect()
}

fn month_trend(transactions: &[Transaction], today: NaiveDate) -> MonthTrend {
    let settings = Settings::default();
    let engine = InsightsEngine::new(transactions, &settings, today);
    let current_month = engine.month_spend(0);
    let previous_month = engine.month_spend(-1);

    let percentage = if previous_month > Decimal::ZERO {
        round_dp(percent_of(current_month - previous_month, previous_month), 2)
    } else {
        Decimal::ZERO
    };

    MonthTrend {
        current_month,
        previous_month,
        percentage,
    }
}
