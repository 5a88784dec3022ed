//! Analytics command implementation

use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tally_core::{AnalyticsPeriod, PeriodAnalytics};

use super::{print_json, Session};

/// Width of the daily bar chart in characters
const BAR_WIDTH: usize = 30;

pub fn cmd_analytics(session: &Session, period: AnalyticsPeriod) -> Result<()> {
    let transactions = session.transactions()?;
    let analytics = PeriodAnalytics::compute(&transactions, session.today, period);

    if session.json {
        return print_json(&analytics);
    }

    let summary = &analytics.summary;
    println!("📊 Analytics ({})", period);
    println!("   Income:          {}", session.money(summary.incomes));
    println!("   Expenses:        {}", session.money(summary.expenses));
    println!("   Balance:         {}", session.money(summary.balance));
    println!("   Average per day: {}", session.money(summary.avg_daily));

    if !analytics.categories.is_empty() {
        println!();
        println!("🏷️  By category:");
        for stat in &analytics.categories {
            println!(
                "   {:<20} {:>16}  ({} transaction{})",
                stat.category,
                session.money(stat.total),
                stat.count,
                if stat.count == 1 { "" } else { "s" }
            );
        }
    }

    let peak = analytics
        .daily
        .iter()
        .map(|d| d.expenses)
        .max()
        .unwrap_or_default();
    if !peak.is_zero() {
        println!();
        println!("📅 Last 30 days:");
        for day in &analytics.daily {
            let share = day.expenses / peak * Decimal::from(BAR_WIDTH);
            let width = share.round().to_usize().unwrap_or(0);
            println!("   {}  {}", day.date.format("%m-%d"), "█".repeat(width));
        }
    }

    println!();
    let trend = &analytics.trend;
    if trend.previous_month.is_zero() {
        println!("No spending last month to compare with.");
    } else {
        println!(
            "This month vs last: {} vs {} ({}%)",
            session.money(trend.current_month),
            session.money(trend.previous_month),
            trend.percentage
        );
    }
    Ok(())
}
