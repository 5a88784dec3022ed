//! Savings goal planning
//!
//! Turns what is left of this month's budget into a recommended saving pace,
//! then splits that pace across the active goals by their deadlines.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::insights::InsightsEngine;
use crate::models::{Goal, GoalStatus, Settings, Transaction};
use crate::money::round_whole;

/// Days assumed for a goal without a deadline
pub const DEFAULT_GOAL_HORIZON_DAYS: i64 = 30;

/// Saving pace for one active goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub remaining: Decimal,
    pub progress_percentage: Decimal,
    pub deadline: Option<NaiveDate>,
    /// Days until the deadline (at least 1), or the default horizon
    pub deadline_days: i64,
    /// Suggested daily saving; never more than the overall daily recommendation
    pub daily_for_goal: Decimal,
}

/// Recommended saving pace for the rest of the month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlan {
    /// Income minus fixed costs minus this month's spending; may be negative
    pub available_for_savings: Decimal,
    pub recommended_daily: Decimal,
    pub recommended_monthly: Decimal,
    /// Days left in the month, today included
    pub days_remaining: u32,
    pub goals: Vec<GoalProgress>,
}

/// Plans savings against the same snapshot the insights engine sees
pub struct GoalPlanner<'a> {
    engine: InsightsEngine<'a>,
}

impl<'a> GoalPlanner<'a> {
    pub fn new(transactions: &'a [Transaction], settings: &'a Settings, today: NaiveDate) -> Self {
        Self {
            engine: InsightsEngine::new(transactions, settings, today),
        }
    }

    /// Build the plan for `goals`; goals that are not active are skipped
    pub fn plan(&self, goals: &[Goal]) -> SavingsPlan {
        let available = self
            .engine
            .settings()
            .available_for_month()
            .saturating_sub(self.engine.month_spend(0));
        let days_remaining = self.engine.daily_spending_limit().days_remaining;

        let recommended_daily = if available > Decimal::ZERO && days_remaining > 0 {
            available / Decimal::from(days_remaining)
        } else {
            Decimal::ZERO
        };

        let goals = goals
            .iter()
            .filter(|goal| goal.status == GoalStatus::Active)
            .map(|goal| self.goal_progress(goal, recommended_daily))
            .collect();

        SavingsPlan {
            available_for_savings: available,
            recommended_daily: round_whole(recommended_daily),
            recommended_monthly: available.max(Decimal::ZERO),
            days_remaining,
            goals,
        }
    }

    fn goal_progress(&self, goal: &Goal, recommended_daily: Decimal) -> GoalProgress {
        let remaining = goal.target_amount.saturating_sub(goal.current_amount);
        let deadline_days = match goal.deadline {
            Some(deadline) => (deadline - self.engine.today()).num_days().max(1),
            None => DEFAULT_GOAL_HORIZON_DAYS,
        };

        let daily_for_goal = if remaining > Decimal::ZERO {
            recommended_daily.min(remaining / Decimal::from(deadline_days))
        } else {
            Decimal::ZERO
        };

        GoalProgress {
            goal_id: goal.id.clone(),
            title: goal.title.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            remaining: remaining.max(Decimal::ZERO),
            progress_percentage: round_whole(goal.progress_percentage()),
            deadline: goal.deadline,
            deadline_days,
            daily_for_goal: round_whole(daily_for_goal),
        }
    }
}
