//! Automatic insights feed - rule-based natural-language cards

use rust_decimal::Decimal;

use crate::money::format_amount;

use super::engine::InsightsEngine;
use super::types::{InsightCard, InsightKind, Priority, Trend};

impl<'a> InsightsEngine<'a> {
    /// Evaluate the feed rules and return the cards, highest priority first
    ///
    /// Cards of equal priority keep the order the rules were evaluated in.
    pub fn automatic_insights(&self) -> Vec<InsightCard> {
        let label = self.config().currency_label.as_str();
        let mut cards = Vec::new();

        let forecast = self.month_end_forecast();
        if forecast.forecast_balance < Decimal::ZERO {
            cards.push(InsightCard::new(
                InsightKind::Warning,
                Priority::High,
                "Overspending risk",
                format!(
                    "At the current pace you will be {} short by the end of the month",
                    format_amount(forecast.forecast_balance.abs(), label)
                ),
            ));
        }

        let comparison = self.period_comparison();
        if comparison.trend == Trend::Up && comparison.percentage > self.config().rising_percentage
        {
            cards.push(InsightCard::new(
                InsightKind::Danger,
                Priority::Medium,
                "Rising expenses",
                format!(
                    "You are spending {}% more than last month",
                    comparison.percentage
                ),
            ));
        } else if comparison.trend == Trend::Down
            && comparison.percentage < self.config().falling_percentage
        {
            cards.push(InsightCard::new(
                InsightKind::Success,
                Priority::Low,
                "Spending down",
                format!(
                    "You are spending {}% less than last month",
                    comparison.percentage.abs()
                ),
            ));
        }

        if let Some(top) = self.top_spending_insights().top_category {
            cards.push(InsightCard::new(
                InsightKind::Info,
                Priority::Medium,
                "Top spending category",
                format!(
                    "Most of this month's money went to \"{}\": {}",
                    top.name,
                    format_amount(top.amount, label)
                ),
            ));
        }

        if let Some(savings) = self.savings_opportunities() {
            cards.push(InsightCard::new(
                InsightKind::Opportunity,
                Priority::Medium,
                "Savings opportunity",
                savings.message,
            ));
        }

        let daily = self.daily_spending_limit();
        if daily.daily_remaining < daily.daily_limit.saturating_mul(self.config().low_balance_ratio) {
            cards.push(InsightCard::new(
                InsightKind::Warning,
                Priority::High,
                "Daily limit running low",
                format!(
                    "Only {} a day left until the end of the month",
                    format_amount(daily.daily_remaining, label)
                ),
            ));
        }

        // sort_by is stable: equal weights keep rule order
        cards.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
        cards
    }
}
