//! Category budget overspend detection

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::money::{percent_of, round_whole};

use super::engine::InsightsEngine;
use super::types::{BudgetStatus, CategoryOverspend};

impl<'a> InsightsEngine<'a> {
    /// Budget categories at or past the warning level this month
    ///
    /// Categories with no spending count as 0 spent. A budget of 0 means no
    /// spending is allowed: any spend against it is reported as "over" with
    /// the saturated percentage from the config and `zero_budget` set.
    /// Entries with status "ok" are dropped; the rest are sorted by
    /// percentage, highest first (ties keep category name order).
    pub fn category_overspending(
        &self,
        budgets: &BTreeMap<String, Decimal>,
    ) -> Vec<CategoryOverspend> {
        if budgets.is_empty() {
            return Vec::new();
        }

        let mut spent_by_category: HashMap<&str, Decimal> = HashMap::new();
        for tx in self.current_month_expenses() {
            let spent = spent_by_category
                .entry(tx.category.as_str())
                .or_insert(Decimal::ZERO);
            *spent = spent.saturating_add(tx.amount);
        }

        let mut overspending: Vec<CategoryOverspend> = budgets
            .iter()
            .filter_map(|(category, &budget)| {
                let budget = budget.max(Decimal::ZERO);
                let spent = spent_by_category
                    .get(category.as_str())
                    .copied()
                    .unwrap_or(Decimal::ZERO);

                let (percentage, zero_budget) = if budget > Decimal::ZERO {
                    (percent_of(spent, budget), false)
                } else if spent > Decimal::ZERO {
                    (self.config().zero_budget_percentage, true)
                } else {
                    (Decimal::ZERO, false)
                };

                let status = self.budget_status(percentage);
                if status == BudgetStatus::Ok {
                    return None;
                }

                Some(CategoryOverspend {
                    category: category.clone(),
                    spent: round_whole(spent),
                    budget: round_whole(budget),
                    remaining: round_whole(budget.saturating_sub(spent)),
                    percentage: round_whole(percentage),
                    status,
                    zero_budget,
                })
            })
            .collect();

        overspending.sort_by(|a, b| b.percentage.cmp(&a.percentage));
        overspending
    }

    fn budget_status(&self, percentage: Decimal) -> BudgetStatus {
        if percentage >= self.config().budget_over_percentage {
            BudgetStatus::Over
        } else if percentage >= self.config().budget_warning_percentage {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Ok
        }
    }
}
