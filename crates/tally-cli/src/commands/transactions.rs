//! Transaction command implementations (list, add expense/income, delete)

use anyhow::{bail, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::{NewTransaction, Transaction, TransactionStore, TransactionType};

use super::{print_json, truncate, Session, LOCAL_USER};

pub fn cmd_transactions_list(session: &Session, limit: usize) -> Result<()> {
    let transactions = session.transactions()?;
    let shown: Vec<&Transaction> = transactions.iter().take(limit).collect();

    if session.json {
        return print_json(&shown);
    }

    if shown.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }

    println!(
        "{:<10}  {:<7}  {:>14}  {:<16}  {:<30}  ID",
        "Date", "Type", "Amount", "Category", "Description"
    );
    println!("{}", "-".repeat(100));
    for tx in &shown {
        let date = tx
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "??".to_string());
        let sign = if tx.is_expense() { "-" } else { "+" };
        println!(
            "{:<10}  {:<7}  {:>14}  {:<16}  {:<30}  {}",
            date,
            tx.kind.as_str(),
            format!("{}{}", sign, session.money(tx.amount)),
            truncate(&tx.category, 16),
            truncate(tx.description.as_deref().unwrap_or(""), 30),
            tx.id
        );
    }

    if transactions.len() > shown.len() {
        println!();
        println!(
            "Showing {} of {} transactions (use --limit to see more)",
            shown.len(),
            transactions.len()
        );
    }
    Ok(())
}

pub fn cmd_add_expense(
    session: &Session,
    amount: Decimal,
    category: Option<String>,
    date: Option<NaiveDate>,
    description: Option<String>,
) -> Result<()> {
    add_transaction(
        session,
        TransactionType::Expense,
        amount,
        category,
        date,
        description,
    )
}

pub fn cmd_add_income(
    session: &Session,
    amount: Decimal,
    date: Option<NaiveDate>,
    description: Option<String>,
) -> Result<()> {
    add_transaction(
        session,
        TransactionType::Income,
        amount,
        None,
        date,
        description,
    )
}

fn add_transaction(
    session: &Session,
    kind: TransactionType,
    amount: Decimal,
    category: Option<String>,
    date: Option<NaiveDate>,
    description: Option<String>,
) -> Result<()> {
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than 0");
    }

    let tx = session.store.save_transaction(
        LOCAL_USER,
        NewTransaction {
            id: None,
            kind,
            amount,
            date: date.unwrap_or(session.today),
            category,
            description,
            created_at: None,
        },
    )?;
    session.save()?;

    if session.json {
        return print_json(&tx);
    }

    let icon = match kind {
        TransactionType::Expense => "💸",
        TransactionType::Income => "💵",
    };
    println!(
        "{} Recorded {} of {}{}",
        icon,
        kind,
        session.money(tx.amount),
        if tx.is_expense() {
            format!(" in {}", tx.category)
        } else {
            String::new()
        }
    );
    println!("   ID: {}", tx.id);
    Ok(())
}

pub fn cmd_delete(session: &Session, id: &str) -> Result<()> {
    session.store.delete_transaction(LOCAL_USER, id)?;
    session.save()?;

    if session.json {
        return print_json(&serde_json::json!({ "deleted": id }));
    }

    println!("🗑️  Deleted transaction {}", id);
    Ok(())
}
