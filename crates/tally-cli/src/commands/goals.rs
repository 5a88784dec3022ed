//! Goal command implementations (list with savings plan, add, deposit, delete)

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::{GoalPlanner, GoalStore, NewGoal};

use super::{print_json, Session, LOCAL_USER};

pub fn cmd_goals_list(session: &Session) -> Result<()> {
    let Some(settings) = session.onboarded_settings()? else {
        return Ok(());
    };
    let transactions = session.transactions()?;
    let goals = session.store.load_goals(LOCAL_USER)?;
    let plan = GoalPlanner::new(&transactions, &settings, session.today).plan(&goals);

    if session.json {
        return print_json(&serde_json::json!({
            "goals": goals,
            "plan": plan,
        }));
    }

    println!("🏦 Savings this month");
    println!(
        "   Available:          {}",
        session.money(plan.available_for_savings)
    );
    if plan.available_for_savings > Decimal::ZERO {
        println!(
            "   Put aside per day:  {} ({} days left)",
            session.money(plan.recommended_daily),
            plan.days_remaining
        );
    } else {
        println!("   Nothing left to save this month");
    }

    if goals.is_empty() {
        println!();
        println!("No goals yet. Add one: tally goals add \"New laptop\" --target 6000000");
        return Ok(());
    }

    println!();
    println!("🎯 Goals:");
    for goal in &goals {
        println!(
            "   {} [{}] {} / {} ({}%)",
            goal.title,
            goal.status,
            session.money(goal.current_amount),
            session.money(goal.target_amount),
            tally_core::money::round_whole(goal.progress_percentage())
        );
        if let Some(progress) = plan.goals.iter().find(|p| p.goal_id == goal.id) {
            if let Some(deadline) = progress.deadline {
                println!("      Deadline: {} ({} days)", deadline, progress.deadline_days);
            }
            if progress.daily_for_goal > Decimal::ZERO {
                println!(
                    "      Save {} a day to stay on track",
                    session.money(progress.daily_for_goal)
                );
            }
        }
        println!("      ID: {}", goal.id);
    }
    Ok(())
}

pub fn cmd_goals_add(
    session: &Session,
    title: &str,
    target: Decimal,
    current: Decimal,
    deadline: Option<NaiveDate>,
) -> Result<()> {
    let goal = session.store.save_goal(
        LOCAL_USER,
        NewGoal {
            id: None,
            title: title.to_string(),
            description: None,
            target_amount: target,
            current_amount: current,
            deadline,
            status: None,
        },
    )?;
    session.save()?;

    if session.json {
        return print_json(&goal);
    }

    println!(
        "✅ Added goal \"{}\" ({})",
        goal.title,
        session.money(goal.target_amount)
    );
    println!("   ID: {}", goal.id);
    Ok(())
}

pub fn cmd_goals_deposit(session: &Session, id: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than 0");
    }

    let goal = session
        .store
        .load_goals(LOCAL_USER)?
        .into_iter()
        .find(|g| g.id == id)
        .with_context(|| format!("Goal not found: {}", id))?;

    let current_amount = goal.current_amount + amount;
    let status = if current_amount >= goal.target_amount {
        tally_core::GoalStatus::Completed
    } else {
        goal.status
    };

    let updated = session.store.save_goal(
        LOCAL_USER,
        NewGoal {
            id: Some(goal.id),
            title: goal.title,
            description: goal.description,
            target_amount: goal.target_amount,
            current_amount,
            deadline: goal.deadline,
            status: Some(status),
        },
    )?;
    session.save()?;

    if session.json {
        return print_json(&updated);
    }

    println!(
        "💰 {} now at {} of {}",
        updated.title,
        session.money(updated.current_amount),
        session.money(updated.target_amount)
    );
    if updated.status == tally_core::GoalStatus::Completed {
        println!("🎉 Goal reached!");
    }
    Ok(())
}

pub fn cmd_goals_delete(session: &Session, id: &str) -> Result<()> {
    session.store.delete_goal(LOCAL_USER, id)?;
    session.save()?;

    if session.json {
        return print_json(&serde_json::json!({ "deleted": id }));
    }

    println!("🗑️  Deleted goal {}", id);
    Ok(())
}
