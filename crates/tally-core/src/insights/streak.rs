//! Spending streak - consecutive days within the flat daily limit

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::engine::InsightsEngine;
use super::types::SpendingStreak;

impl<'a> InsightsEngine<'a> {
    /// Count days, walking back from today, whose spending stayed within the
    /// flat daily limit
    ///
    /// The walk stops at the first day over the limit or at the first of the
    /// month: streaks never carry over from the previous month.
    pub fn spending_streak(&self) -> SpendingStreak {
        let daily_limit = self.daily_spending_limit().daily_limit;
        let month_start = self.current_month().start;

        let mut spent_by_day: HashMap<NaiveDate, Decimal> = HashMap::new();
        for tx in self.current_month_expenses() {
            if let Some(date) = tx.date {
                let spent = spent_by_day.entry(date).or_insert(Decimal::ZERO);
                *spent = spent.saturating_add(tx.amount);
            }
        }

        let mut days = 0u32;
        let mut day = self.today();
        while day >= month_start {
            let spent = spent_by_day.get(&day).copied().unwrap_or(Decimal::ZERO);
            if spent > daily_limit {
                break;
            }
            days += 1;
            match day.pred_opt() {
                Some(prev) => day = prev,
                None => break,
            }
        }

        SpendingStreak {
            days,
            is_active: days > 0,
            message: self.streak_message(days).to_string(),
        }
    }

    fn streak_message(&self, days: u32) -> &'static str {
        if days > self.config().streak_great_days {
            "Excellent discipline!"
        } else if days > self.config().streak_good_days {
            "Good job!"
        } else {
            "Keep going!"
        }
    }
}
