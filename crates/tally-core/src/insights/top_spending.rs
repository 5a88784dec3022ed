//! Top spending day/category and the savings opportunity built on it

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::money::{format_amount, round_whole};

use super::engine::InsightsEngine;
use super::types::{SavingsOpportunity, TopCategory, TopDay, TopSpending};

/// Entry with the largest total; on a tie the first key (in key order) wins
fn largest<K>(totals: impl IntoIterator<Item = (K, Decimal)>) -> Option<(K, Decimal)> {
    let mut best: Option<(K, Decimal)> = None;
    for (key, amount) in totals {
        if best.as_ref().map_or(true, |(_, top)| amount > *top) {
            best = Some((key, amount));
        }
    }
    best
}

impl<'a> InsightsEngine<'a> {
    /// The most expensive day and category of the current month
    pub fn top_spending_insights(&self) -> TopSpending {
        let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();

        for tx in self.current_month_expenses() {
            if let Some(date) = tx.date {
                let day_total = by_date.entry(date).or_insert(Decimal::ZERO);
                *day_total = day_total.saturating_add(tx.amount);
            }
            let category_total = by_category
                .entry(tx.category.as_str())
                .or_insert(Decimal::ZERO);
            *category_total = category_total.saturating_add(tx.amount);
        }

        TopSpending {
            top_day: largest(by_date).map(|(date, amount)| TopDay { date, amount }),
            top_category: largest(by_category).map(|(name, amount)| TopCategory {
                name: name.to_string(),
                amount,
            }),
        }
    }

    /// How much trimming the top category by 10% or 20% would save
    ///
    /// `None` when nothing was spent this month.
    pub fn savings_opportunities(&self) -> Option<SavingsOpportunity> {
        let top = self.top_spending_insights().top_category?;

        let if_reduce_10 = round_whole(top.amount.saturating_mul(dec!(0.1)));
        let if_reduce_20 = round_whole(top.amount.saturating_mul(dec!(0.2)));
        let message = format!(
            "Cut \"{}\" by 20% and you would save {}",
            top.name,
            format_amount(if_reduce_20, &self.config().currency_label)
        );

        Some(SavingsOpportunity {
            category: top.name,
            current: top.amount,
            if_reduce_10,
            if_reduce_20,
            message,
        })
    }
}
