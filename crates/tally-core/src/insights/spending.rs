//! Monthly spending figures: daily allowance, month-over-month comparison
//! and the month-end forecast

use rust_decimal::Decimal;

use crate::money::{percent_of, round_whole};

use super::engine::InsightsEngine;
use super::types::{
    DailyLimitFormula, DailySpendingLimit, ForecastScenario, MonthEndForecast, PeriodComparison,
    Trend,
};

impl<'a> InsightsEngine<'a> {
    /// Daily spending allowance for the current month
    ///
    /// The flat `daily_limit` spreads income minus fixed costs over every day
    /// of the month; `daily_remaining` spreads what is left over the days
    /// still ahead, today included. Negative allowances are shown as 0 (the
    /// forecast carries the warning); the formula keeps the raw values.
    pub fn daily_spending_limit(&self) -> DailySpendingLimit {
        let monthly_income = self.settings().monthly_income;
        let fixed_expenses = self.settings().fixed_expenses;
        let available_for_month = self.settings().available_for_month();

        let days_in_month = self.days_in_month();
        let current_day = self.current_day();
        let days_remaining = days_in_month - current_day + 1;

        let daily_limit = available_for_month / Decimal::from(days_in_month);
        let current_spending = self.month_spend(0);
        let remaining_for_month = available_for_month.saturating_sub(current_spending);
        let daily_remaining = remaining_for_month / Decimal::from(days_remaining);

        DailySpendingLimit {
            daily_limit: round_whole(daily_limit.max(Decimal::ZERO)),
            daily_remaining: round_whole(daily_remaining.max(Decimal::ZERO)),
            remaining_for_month: round_whole(remaining_for_month.max(Decimal::ZERO)),
            days_remaining,
            formula: DailyLimitFormula {
                monthly_income,
                fixed_expenses,
                available_for_month,
                days_in_month,
                current_day,
                daily_limit,
                current_spending,
                remaining_for_month,
                days_remaining,
                daily_remaining,
            },
        }
    }

    /// This month's spending against last month's
    pub fn period_comparison(&self) -> PeriodComparison {
        let current = self.month_spend(0);
        let previous = self.month_spend(-1);
        let difference = current - previous;

        // No baseline: report 0 rather than dividing by zero
        let percentage = if previous > Decimal::ZERO {
            round_whole(percent_of(difference, previous))
        } else {
            Decimal::ZERO
        };

        let trend = if difference > Decimal::ZERO {
            Trend::Up
        } else if difference < Decimal::ZERO {
            Trend::Down
        } else {
            Trend::Same
        };

        PeriodComparison {
            current,
            previous,
            difference,
            percentage,
            trend,
        }
    }

    /// Project the current spending pace to the end of the month
    pub fn month_end_forecast(&self) -> MonthEndForecast {
        let monthly_income = self.settings().monthly_income;
        let fixed_expenses = self.settings().fixed_expenses;
        let available = self.settings().available_for_month();

        let current_spending = self.month_spend(0);
        let days_in_month = self.days_in_month();
        let current_day = self.current_day();
        let days_remaining = days_in_month - current_day;

        let avg_daily_spending = current_spending / Decimal::from(current_day.max(1));
        let projected_spending = current_spending
            .saturating_add(avg_daily_spending.saturating_mul(Decimal::from(days_remaining)));
        let forecast_balance = available.saturating_sub(projected_spending);
        let worst_case_balance = available
            .saturating_sub(projected_spending.saturating_mul(self.config().worst_case_factor));

        let scenario = if forecast_balance > Decimal::ZERO {
            ForecastScenario::Positive
        } else if forecast_balance < -self.config().negative_forecast_threshold {
            ForecastScenario::Negative
        } else {
            ForecastScenario::Warning
        };

        MonthEndForecast {
            forecast_balance: round_whole(forecast_balance),
            projected_spending: round_whole(projected_spending),
            worst_case_balance: round_whole(worst_case_balance),
            current_spending,
            monthly_income,
            fixed_expenses,
            days_remaining,
            avg_daily_spending: round_whole(avg_daily_spending),
            scenario,
        }
    }
}
