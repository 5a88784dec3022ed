//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Session (snapshot, config, today) and shared output helpers
//! - `insights` - Insight commands (insights, daily, forecast, budgets, feed)
//! - `settings` - Onboarding and category budget commands
//! - `goals` - Savings goal commands (list with plan, add, deposit, delete)
//! - `categories` - Expense category commands (list, add, rename, delete)
//! - `analytics` - Period analytics command
//! - `transactions` - Transaction commands (list, add expense/income, delete)

pub mod analytics;
pub mod categories;
pub mod core;
pub mod goals;
pub mod insights;
pub mod settings;
pub mod transactions;

// Re-export command functions for main.rs
pub use analytics::*;
pub use categories::*;
pub use self::core::*;
pub use goals::*;
pub use insights::*;
pub use settings::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
