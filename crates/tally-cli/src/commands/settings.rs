//! Settings command implementations (onboard, budgets set/remove)

use anyhow::{bail, Result};
use rust_decimal::Decimal;
use tally_core::{SettingsPatch, SettingsStore};

use super::{print_json, Session, LOCAL_USER};

pub fn cmd_onboard(
    session: &Session,
    income: Decimal,
    fixed: Decimal,
    goal: Option<String>,
) -> Result<()> {
    let settings = session
        .store
        .complete_onboarding(LOCAL_USER, income, fixed, goal)?;
    session.save()?;

    if session.json {
        return print_json(&settings);
    }

    println!("✅ Budget set up!");
    println!("   Monthly income:  {}", session.money(settings.monthly_income));
    println!("   Fixed expenses:  {}", session.money(settings.fixed_expenses));
    println!(
        "   Available:       {}",
        session.money(settings.available_for_month())
    );
    if let Some(goal) = &settings.financial_goal {
        println!("   Saving for:      {}", goal);
    }
    if settings.available_for_month() < Decimal::ZERO {
        println!("   ⚠️  Fixed expenses exceed income");
    }
    println!();
    println!("Next steps:");
    println!("  1. Record spending: tally add-expense 45000 --category Food");
    println!("  2. Check your allowance: tally daily");
    Ok(())
}

pub fn cmd_budget_set(session: &Session, category: &str, amount: Decimal) -> Result<()> {
    let Some(settings) = session.onboarded_settings()? else {
        return Ok(());
    };
    let category = category.trim();
    if category.is_empty() {
        bail!("Category name cannot be empty");
    }
    if amount < Decimal::ZERO {
        bail!("Budget cannot be negative: {}", amount);
    }

    let mut budgets = settings.budgets;
    budgets.insert(category.to_string(), amount);
    let settings = session.store.save_settings(
        LOCAL_USER,
        SettingsPatch {
            budgets: Some(budgets),
            ..Default::default()
        },
    )?;
    session.save()?;

    if session.json {
        return print_json(&settings.budgets);
    }

    println!("✅ Budget for {} set to {}", category, session.money(amount));
    Ok(())
}

pub fn cmd_budget_remove(session: &Session, category: &str) -> Result<()> {
    let Some(settings) = session.onboarded_settings()? else {
        return Ok(());
    };

    let mut budgets = settings.budgets;
    if budgets.remove(category).is_none() {
        bail!("No budget set for category: {}", category);
    }
    let settings = session.store.save_settings(
        LOCAL_USER,
        SettingsPatch {
            budgets: Some(budgets),
            ..Default::default()
        },
    )?;
    session.save()?;

    if session.json {
        return print_json(&settings.budgets);
    }

    println!("🗑️  Removed budget for {}", category);
    Ok(())
}
