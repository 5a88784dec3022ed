//! Shared builders for insights tests

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Settings, Transaction, TransactionType};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn created(on: &str) -> DateTime<Utc> {
    format!("{}T12:00:00Z", on).parse().unwrap()
}

pub fn expense(id: &str, amount: Decimal, on: &str, category: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind: TransactionType::Expense,
        amount,
        date: Some(NaiveDate::parse_from_str(on, "%Y-%m-%d").unwrap()),
        category: category.to_string(),
        description: None,
        created_at: created(on),
    }
}

pub fn income(id: &str, amount: Decimal, on: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind: TransactionType::Income,
        amount,
        date: Some(NaiveDate::parse_from_str(on, "%Y-%m-%d").unwrap()),
        category: String::new(),
        description: Some("Salary".to_string()),
        created_at: created(on),
    }
}

pub fn settings_with(income: Decimal, fixed: Decimal) -> Settings {
    Settings {
        monthly_income: income,
        fixed_expenses: fixed,
        onboarding_completed: true,
        ..Default::default()
    }
}

pub fn budgets(entries: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
    entries
        .iter()
        .map(|(name, cap)| (name.to_string(), *cap))
        .collect()
}

/// A few weeks of ordinary activity around April 2026
pub fn sample_month() -> Vec<Transaction> {
    vec![
        expense("m1", dec!(120000), "2026-03-04", "Food"),
        expense("m2", dec!(300000), "2026-03-15", "Rent"),
        expense("m3", dec!(45000), "2026-03-20", "Transport"),
        income("i1", dec!(5000000), "2026-04-01"),
        expense("a1", dec!(85000), "2026-04-02", "Food"),
        expense("a2", dec!(15200), "2026-04-03", "Transport"),
        expense("a3", dec!(14800), "2026-04-06", "Transport"),
        expense("a4", dec!(15500), "2026-04-09", "Transport"),
        expense("a5", dec!(230000), "2026-04-09", "Shopping"),
        expense("a6", dec!(64000), "2026-04-11", "Food"),
        expense("a7", dec!(30000), "2026-04-12", "Cafe"),
    ]
}
