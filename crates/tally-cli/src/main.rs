//! Tally CLI - Personal budget tracker with spending insights
//!
//! Usage:
//!   tally onboard --income 5000000 --fixed 2000000   Set up your budget
//!   tally add-expense 45000 --category Food          Record an expense
//!   tally daily                                      Today's allowance
//!   tally insights                                   Everything at once

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::Session;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let session = Session::open(&cli.data, cli.config.as_deref(), cli.today, cli.json)?;

    match cli.command {
        Commands::Onboard {
            income,
            fixed,
            goal,
        } => commands::cmd_onboard(&session, income, fixed, goal),
        Commands::Insights => commands::cmd_insights(&session),
        Commands::Daily => commands::cmd_daily(&session),
        Commands::Forecast => commands::cmd_forecast(&session),
        Commands::Budgets { action } => match action {
            None => commands::cmd_budgets(&session),
            Some(BudgetsAction::Set { category, amount }) => {
                commands::cmd_budget_set(&session, &category, amount)
            }
            Some(BudgetsAction::Remove { category }) => {
                commands::cmd_budget_remove(&session, &category)
            }
        },
        Commands::Feed => commands::cmd_feed(&session),
        Commands::Goals { action } => match action {
            None => commands::cmd_goals_list(&session),
            Some(GoalsAction::Add {
                title,
                target,
                current,
                deadline,
            }) => commands::cmd_goals_add(&session, &title, target, current, deadline),
            Some(GoalsAction::Deposit { id, amount }) => {
                commands::cmd_goals_deposit(&session, &id, amount)
            }
            Some(GoalsAction::Delete { id }) => commands::cmd_goals_delete(&session, &id),
        },
        Commands::Categories { action } => match action {
            None => commands::cmd_categories_list(&session),
            Some(CategoriesAction::Add { name }) => commands::cmd_categories_add(&session, &name),
            Some(CategoriesAction::Rename { id, name }) => {
                commands::cmd_categories_rename(&session, &id, &name)
            }
            Some(CategoriesAction::Delete { id }) => {
                commands::cmd_categories_delete(&session, &id)
            }
        },
        Commands::Analytics { period } => commands::cmd_analytics(&session, period),
        Commands::Transactions { limit } => commands::cmd_transactions_list(&session, limit),
        Commands::AddExpense {
            amount,
            category,
            date,
            description,
        } => commands::cmd_add_expense(&session, amount, category, date, description),
        Commands::AddIncome {
            amount,
            date,
            description,
        } => commands::cmd_add_income(&session, amount, date, description),
        Commands::Delete { id } => commands::cmd_delete(&session, &id),
    }
}
