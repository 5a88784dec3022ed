//! Recurring expense detection
//!
//! A heuristic, not exact-match recurrence: this month's expenses are
//! bucketed by category and amount rounded to `recurring_rounding_step`, and
//! any bucket seen often enough counts as a recurring group.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use super::engine::InsightsEngine;
use super::types::RecurringExpense;

/// Round `amount` to the nearest multiple of `step`
///
/// Midpoints go toward zero so that an amount exactly halfway between two
/// buckets lands in the lower one (`15500` at step `1000` is `15000`).
pub(crate) fn bucket_amount(amount: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return amount;
    }
    match amount.checked_div(step) {
        Some(units) => units
            .round_dp_with_strategy(0, RoundingStrategy::MidpointTowardZero)
            .saturating_mul(step),
        None => amount,
    }
}

impl<'a> InsightsEngine<'a> {
    /// Groups of similar expenses seen at least `recurring_min_occurrences`
    /// times this month, most frequent first, capped at `recurring_max_groups`
    pub fn recurring_expenses(&self) -> Vec<RecurringExpense> {
        let step = self.config().recurring_rounding_step;

        let mut buckets: BTreeMap<(&str, Decimal), (usize, Decimal)> = BTreeMap::new();
        for tx in self.current_month_expenses() {
            let key = (tx.category.as_str(), bucket_amount(tx.amount, step));
            let entry = buckets.entry(key).or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 = entry.1.saturating_add(tx.amount);
        }

        let mut groups: Vec<RecurringExpense> = buckets
            .into_iter()
            .filter(|(_, (count, _))| *count >= self.config().recurring_min_occurrences)
            .map(|((category, amount), (count, total))| RecurringExpense {
                category: category.to_string(),
                amount,
                count,
                total,
            })
            .collect();

        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups.truncate(self.config().recurring_max_groups);
        groups
    }
}
