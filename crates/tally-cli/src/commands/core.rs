//! Session and shared utilities
//!
//! This module contains:
//! - `Session` - Snapshot-backed store, tuning config and the injected date
//! - `print_json` - Shared `--json` output

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::{
    format_amount, InsightsConfig, InsightsEngine, MemoryStore, Settings, SettingsStore, Snapshot,
    Transaction, TransactionStore,
};

/// User key for the single-user snapshot file
pub const LOCAL_USER: &str = "local";

/// Everything a command needs: the store, config and a single `today`
pub struct Session {
    pub data_path: PathBuf,
    pub store: MemoryStore,
    pub config: InsightsConfig,
    pub today: NaiveDate,
    pub json: bool,
}

impl Session {
    /// Load the snapshot and config; `today` defaults to the local date
    pub fn open(
        data_path: &Path,
        config_path: Option<&Path>,
        today: Option<NaiveDate>,
        json: bool,
    ) -> Result<Self> {
        let snapshot = Snapshot::load(data_path)
            .with_context(|| format!("Failed to read {}", data_path.display()))?;
        let config = InsightsConfig::load(config_path).context("Failed to load insights config")?;
        let today = today.unwrap_or_else(|| Local::now().date_naive());

        tracing::debug!(data = %data_path.display(), today = %today, "Session opened");

        Ok(Self {
            data_path: data_path.to_path_buf(),
            store: MemoryStore::from_snapshot(LOCAL_USER, snapshot),
            config,
            today,
            json,
        })
    }

    /// Write the store back to the snapshot file
    pub fn save(&self) -> Result<()> {
        self.store
            .to_snapshot(LOCAL_USER)?
            .save(&self.data_path)
            .with_context(|| format!("Failed to write {}", self.data_path.display()))
    }

    /// Settings, or `None` after printing a hint when onboarding is not done
    pub fn onboarded_settings(&self) -> Result<Option<Settings>> {
        let settings = self.store.load_settings(LOCAL_USER)?;
        if settings.onboarding_completed {
            return Ok(Some(settings));
        }

        if self.json {
            print_json(&serde_json::json!({ "onboarding_required": true }))?;
        } else {
            println!("👋 Welcome to Tally! Set up your budget first:");
            println!("   tally onboard --income <monthly income> --fixed <fixed expenses>");
        }
        Ok(None)
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.store.load_transactions(LOCAL_USER)?)
    }

    /// Engine over `transactions` and `settings` with this session's config and date
    pub fn engine<'a>(
        &self,
        transactions: &'a [Transaction],
        settings: &'a Settings,
    ) -> InsightsEngine<'a> {
        InsightsEngine::new(transactions, settings, self.today).with_config(self.config.clone())
    }

    /// Format an amount with the configured currency label
    pub fn money(&self, value: Decimal) -> String {
        format_amount(value, &self.config.currency_label)
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
