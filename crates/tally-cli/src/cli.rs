//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tally_core::AnalyticsPeriod;

/// Tally - Know where your money goes before the month ends
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal budget tracker with spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot file holding settings, transactions and goals
    #[arg(long, default_value = "tally.json", global = true)]
    pub data: PathBuf,

    /// Insights tuning config (defaults to the data-dir override or built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Compute everything as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set monthly income and fixed expenses (required before anything else)
    Onboard {
        /// Monthly income after taxes
        #[arg(long)]
        income: Decimal,

        /// Rent, utilities, subscriptions and other fixed monthly costs
        #[arg(long, default_value = "0")]
        fixed: Decimal,

        /// What you are saving for
        #[arg(long)]
        goal: Option<String>,
    },

    /// Show every insight at once
    Insights,

    /// Show today's spending allowance
    Daily,

    /// Show the month-end forecast and comparison with last month
    Forecast,

    /// Show category budgets and overspending
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Show the prioritized insight feed
    Feed,

    /// Manage savings goals
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Manage expense categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Show totals and category breakdown for a period
    Analytics {
        /// Period: all, month or week
        #[arg(short, long, default_value = "all")]
        period: AnalyticsPeriod,
    },

    /// List recent transactions
    Transactions {
        /// Maximum number to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record an expense
    AddExpense {
        /// Amount spent
        amount: Decimal,

        /// Category (defaults to "Other")
        #[arg(short, long)]
        category: Option<String>,

        /// Date of the expense (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Free-text note
        #[arg(long)]
        description: Option<String>,
    },

    /// Record an income
    AddIncome {
        /// Amount received
        amount: Decimal,

        /// Date of the income (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Free-text note
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a transaction by id
    Delete {
        /// Transaction id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// Set the monthly cap for a category
    Set {
        /// Category name
        category: String,

        /// Monthly cap (0 means no spending allowed)
        amount: Decimal,
    },

    /// Remove a category budget
    Remove {
        /// Category name
        category: String,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// Add a custom category
    Add {
        /// Category name
        name: String,
    },

    /// Rename a custom category
    Rename {
        /// Category id
        id: String,

        /// New name
        name: String,
    },

    /// Delete a custom category
    Delete {
        /// Category id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// Add a savings goal
    Add {
        /// Goal title
        title: String,

        /// Target amount
        #[arg(long)]
        target: Decimal,

        /// Amount already saved
        #[arg(long, default_value = "0")]
        current: Decimal,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },

    /// Record money put towards a goal
    Deposit {
        /// Goal id
        id: String,

        /// Amount added
        amount: Decimal,
    },

    /// Delete a goal
    Delete {
        /// Goal id
        id: String,
    },
}
