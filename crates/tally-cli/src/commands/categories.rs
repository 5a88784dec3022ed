//! Category command implementations (list, add, rename, delete)

use anyhow::Result;
use tally_core::{CategoryStore, NewCategory};

use super::{print_json, Session, LOCAL_USER};

pub fn cmd_categories_list(session: &Session) -> Result<()> {
    let categories = session.store.load_categories(LOCAL_USER)?;

    if session.json {
        return print_json(&categories);
    }

    println!("🏷️  Categories:");
    for category in &categories {
        if category.is_default {
            println!("   {:<24} (default)", category.name);
        } else {
            println!("   {:<24} ID: {}", category.name, category.id);
        }
    }
    Ok(())
}

pub fn cmd_categories_add(session: &Session, name: &str) -> Result<()> {
    let category = session.store.save_category(
        LOCAL_USER,
        NewCategory {
            id: None,
            name: name.to_string(),
        },
    )?;
    session.save()?;

    if session.json {
        return print_json(&category);
    }

    println!("✅ Added category {}", category.name);
    println!("   ID: {}", category.id);
    Ok(())
}

pub fn cmd_categories_rename(session: &Session, id: &str, name: &str) -> Result<()> {
    let category = session.store.save_category(
        LOCAL_USER,
        NewCategory {
            id: Some(id.to_string()),
            name: name.to_string(),
        },
    )?;
    session.save()?;

    if session.json {
        return print_json(&category);
    }

    println!("✏️  Category renamed to {}", category.name);
    Ok(())
}

pub fn cmd_categories_delete(session: &Session, id: &str) -> Result<()> {
    session.store.delete_category(LOCAL_USER, id)?;
    session.save()?;

    if session.json {
        return print_json(&serde_json::json!({ "deleted": id }));
    }

    println!("🗑️  Deleted category {}", id);
    Ok(())
}
