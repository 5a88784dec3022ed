//! Insight command implementations (insights, daily, forecast, budgets, feed)

use anyhow::Result;
use tally_core::insights::{
    AllInsights, BudgetStatus, CategoryOverspend, DailySpendingLimit, ForecastScenario,
    InsightCard, InsightKind, MonthEndForecast, PeriodComparison, Trend,
};

use super::{print_json, Session};

pub fn cmd_insights(session: &Session) -> Result<()> {
    let Some(settings) = session.onboarded_settings()? else {
        return Ok(());
    };
    let transactions = session.transactions()?;
    let engine = session.engine(&transactions, &settings);
    let insights = engine.all_insights(&settings.budgets);

    if session.json {
        return print_json(&insights);
    }

    print_all(session, &insights);
    Ok(())
}

pub fn cmd_daily(session: &Session) -> Result<()> {
    let Some(settings) = session.onboarded_settings()? else {
        return Ok(());
    };
    let transactions = session.transactions()?;
    let engine = session.engine(&transactions, &settings);
    let limit = engine.daily_spending_limit();
    let streak = engine.spending_streak();

    if session.json {
        return print_json(&serde_json::json!({
            "daily_limit": limit,
            "streak": streak,
        }));
    }

    print_daily(session, &limit);
    println!();
    if streak.is_active {
        println!(
            "🔥 {} day{} within the limit. {}",
            streak.days,
            if streak.days == 1 { "" } else { "s" },
            streak.message
        );
    } else {
        println!("🔥 No streak yet today. {}", streak.message);
    }
    Ok(())
}

pub fn cmd_forecast(session: &Session) -> Result<()> {
    let Some(settings) = session.onboarded_settings()? else {
        return Ok(());
    };
    let transactions = session.transactions()?;
    let engine = session.engine(&transactions, &settings);
    let forecast = engine.month_end_forecast();
    let comparison = engine.period_comparison();

    if session.json {
        return print_json(&serde_json::json!({
            "forecast": forecast,
            "comparison": comparison,
        }));
    }

    print_forecast(session, &forecast);
    println!();
    print_comparison(session, &comparison);
    Ok(())
}

pub fn cmd_budgets(session: &Session) -> Result<()> {
    let Some(settings) = session.onboarded_settings()? else {
        return Ok(());
    };
    let transactions = session.transactions()?;
    let engine = session.engine(&transactions, &settings);
    let overspending = engine.category_overspending(&settings.budgets);

    if session.json {
        return print_json(&serde_json::json!({
            "budgets": settings.budgets,
            "overspending": overspending,
        }));
    }

    if settings.budgets.is_empty() {
        println!("No category budgets set.");
        println!("   Add one: tally budgets set <category> <amount>");
        return Ok(());
    }

    println!("💼 Category budgets:");
    for (category, cap) in &settings.budgets {
        println!("   {:<20} {:>16}", category, session.money(*cap));
    }

    println!();
    print_overspending(session, &overspending);
    Ok(())
}

pub fn cmd_feed(session: &Session) -> Result<()> {
    let Some(settings) = session.onboarded_settings()? else {
        return Ok(());
    };
    let transactions = session.transactions()?;
    let engine = session.engine(&transactions, &settings);
    let cards = engine.automatic_insights();

    if session.json {
        return print_json(&cards);
    }

    print_feed(&cards);
    Ok(())
}

fn print_all(session: &Session, insights: &AllInsights) {
    print_daily(session, &insights.daily_limit);
    println!();
    print_forecast(session, &insights.forecast);
    println!();
    print_comparison(session, &insights.comparison);
    println!();
    print_overspending(session, &insights.overspending);

    println!();
    if let Some(day) = &insights.top_spending.top_day {
        println!(
            "📈 Most expensive day: {} ({})",
            day.date,
            session.money(day.amount)
        );
    }
    if let Some(category) = &insights.top_spending.top_category {
        println!(
            "🏷️  Top category: {} ({})",
            category.name,
            session.money(category.amount)
        );
    }

    if !insights.recurring_expenses.is_empty() {
        println!();
        println!("🔁 Recurring expenses this month:");
        for group in &insights.recurring_expenses {
            println!(
                "   {:<20} ~{} x{} = {}",
                group.category,
                session.money(group.amount),
                group.count,
                session.money(group.total)
            );
        }
    }

    println!();
    print_feed(&insights.automatic_insights);
}

fn print_daily(session: &Session, limit: &DailySpendingLimit) {
    let formula = &limit.formula;
    println!("💰 Daily allowance");
    println!("   Flat daily limit:   {}", session.money(limit.daily_limit));
    println!("   Left per day:       {}", session.money(limit.daily_remaining));
    println!(
        "   Left this month:    {} over {} day{}",
        session.money(limit.remaining_for_month),
        limit.days_remaining,
        if limit.days_remaining == 1 { "" } else { "s" }
    );
    println!(
        "   ({} income - {} fixed - {} spent)",
        session.money(formula.monthly_income),
        session.money(formula.fixed_expenses),
        session.money(formula.current_spending)
    );
}

fn print_forecast(session: &Session, forecast: &MonthEndForecast) {
    let icon = match forecast.scenario {
        ForecastScenario::Positive => "✅",
        ForecastScenario::Warning => "⚠️ ",
        ForecastScenario::Negative => "🚨",
    };
    println!("{} Month-end forecast ({})", icon, forecast.scenario);
    println!("   Spent so far:       {}", session.money(forecast.current_spending));
    println!("   Average per day:    {}", session.money(forecast.avg_daily_spending));
    println!("   Projected spending: {}", session.money(forecast.projected_spending));
    println!("   Expected balance:   {}", session.money(forecast.forecast_balance));
    println!("   Worst case:         {}", session.money(forecast.worst_case_balance));
}

fn print_comparison(session: &Session, comparison: &PeriodComparison) {
    let arrow = match comparison.trend {
        Trend::Up => "⬆️ ",
        Trend::Down => "⬇️ ",
        Trend::Same => "➡️ ",
    };
    println!(
        "{} This month {} vs last month {}",
        arrow,
        session.money(comparison.current),
        session.money(comparison.previous)
    );
    if comparison.previous.is_zero() {
        println!("   (no spending last month to compare with)");
    } else {
        println!("   Change: {}%", comparison.percentage);
    }
}

fn print_overspending(session: &Session, overspending: &[CategoryOverspend]) {
    if overspending.is_empty() {
        println!("✅ All categories within budget");
        return;
    }

    println!("📊 Budgets needing attention:");
    for entry in overspending {
        let icon = match entry.status {
            BudgetStatus::Over => "🔴",
            _ => "🟡",
        };
        let percentage = if entry.zero_budget {
            "no budget".to_string()
        } else {
            format!("{}%", entry.percentage)
        };
        println!(
            "   {} {:<20} {} of {} ({})",
            icon,
            entry.category,
            session.money(entry.spent),
            session.money(entry.budget),
            percentage
        );
    }
}

fn print_feed(cards: &[InsightCard]) {
    if cards.is_empty() {
        println!("Nothing to report yet. Add some transactions first.");
        return;
    }

    for card in cards {
        let icon = match card.kind {
            InsightKind::Warning => "⚠️ ",
            InsightKind::Danger => "🚨",
            InsightKind::Success => "🎉",
            InsightKind::Info => "ℹ️ ",
            InsightKind::Opportunity => "💡",
        };
        println!("{} [{}] {}", icon, card.priority, card.title);
        println!("   {}", card.message);
    }
}
