//! Insights tuning configuration
//!
//! Holds the product-policy constants the engine applies (forecast scenario
//! threshold, budget warning levels, recurring-expense bucketing, feed rules).
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/tally/config/insights.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::money::parse_amount;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

/// Tuning constants for the insights engine
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsConfig {
    /// Forecast balance below the negated threshold is a "negative" scenario
    pub negative_forecast_threshold: Decimal,
    /// Multiplier applied to projected spending for the worst case
    pub worst_case_factor: Decimal,
    /// Category status becomes "warning" at this percentage of the budget
    pub budget_warning_percentage: Decimal,
    /// Category status becomes "over" at this percentage of the budget
    pub budget_over_percentage: Decimal,
    /// Percentage reported for a zero budget with spending against it
    pub zero_budget_percentage: Decimal,
    /// Granularity used to bucket amounts when looking for recurring expenses
    pub recurring_rounding_step: Decimal,
    pub recurring_min_occurrences: usize,
    pub recurring_max_groups: usize,
    /// Month-over-month increase (percent) that raises a rising-expenses card
    pub rising_percentage: Decimal,
    /// Month-over-month change (percent, negative) that raises a positive-trend card
    pub falling_percentage: Decimal,
    /// Remaining daily allowance below this share of the flat limit is "low"
    pub low_balance_ratio: Decimal,
    pub streak_great_days: u32,
    pub streak_good_days: u32,
    /// Label appended to formatted amounts
    pub currency_label: String,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            negative_forecast_threshold: dec!(50000),
            worst_case_factor: dec!(1.2),
            budget_warning_percentage: dec!(80),
            budget_over_percentage: dec!(100),
            zero_budget_percentage: dec!(999),
            recurring_rounding_step: dec!(1000),
            recurring_min_occurrences: 3,
            recurring_max_groups: 3,
            rising_percentage: dec!(15),
            falling_percentage: dec!(-10),
            low_balance_ratio: dec!(0.3),
            streak_great_days: 7,
            streak_good_days: 3,
            currency_label: "sum".to_string(),
        }
    }
}

impl InsightsConfig {
    /// Load config: explicit path or data-dir override first, then embedded defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        let content = match path {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading insights config");
                fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
            }
            _ => DEFAULT_CONFIG.to_string(),
        };

        parse_config(&content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("insights.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    forecast: Option<RawForecast>,
    budgets: Option<RawBudgets>,
    recurring: Option<RawRecurring>,
    feed: Option<RawFeed>,
    streak: Option<RawStreak>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    negative_threshold: Option<f64>,
    worst_case_factor: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBudgets {
    warning_percentage: Option<f64>,
    over_percentage: Option<f64>,
    zero_budget_percentage: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRecurring {
    rounding_step: Option<f64>,
    min_occurrences: Option<usize>,
    max_groups: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawFeed {
    rising_percentage: Option<f64>,
    falling_percentage: Option<f64>,
    low_balance_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawStreak {
    great_days: Option<u32>,
    good_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_label: Option<String>,
}

fn decimal(key: &str, value: f64) -> Result<Decimal> {
    parse_amount(&value.to_string())
        .ok_or_else(|| Error::Config(format!("{} is not a valid number: {}", key, value)))
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<InsightsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = InsightsConfig::default();

    if let Some(forecast) = raw.forecast {
        if let Some(v) = forecast.negative_threshold {
            config.negative_forecast_threshold = decimal("forecast.negative_threshold", v)?;
        }
        if let Some(v) = forecast.worst_case_factor {
            config.worst_case_factor = decimal("forecast.worst_case_factor", v)?;
        }
    }

    if let Some(budgets) = raw.budgets {
        if let Some(v) = budgets.warning_percentage {
            config.budget_warning_percentage = decimal("budgets.warning_percentage", v)?;
        }
        if let Some(v) = budgets.over_percentage {
            config.budget_over_percentage = decimal("budgets.over_percentage", v)?;
        }
        if let Some(v) = budgets.zero_budget_percentage {
            config.zero_budget_percentage = decimal("budgets.zero_budget_percentage", v)?;
        }
    }

    if let Some(recurring) = raw.recurring {
        if let Some(v) = recurring.rounding_step {
            config.recurring_rounding_step = decimal("recurring.rounding_step", v)?;
        }
        if let Some(v) = recurring.min_occurrences {
            config.recurring_min_occurrences = v;
        }
        if let Some(v) = recurring.max_groups {
            config.recurring_max_groups = v;
        }
    }

    if let Some(feed) = raw.feed {
        if let Some(v) = feed.rising_percentage {
            config.rising_percentage = decimal("feed.rising_percentage", v)?;
        }
        if let Some(v) = feed.falling_percentage {
            config.falling_percentage = decimal("feed.falling_percentage", v)?;
        }
        if let Some(v) = feed.low_balance_ratio {
            config.low_balance_ratio = decimal("feed.low_balance_ratio", v)?;
        }
    }

    if let Some(streak) = raw.streak {
        if let Some(v) = streak.great_days {
            config.streak_great_days = v;
        }
        if let Some(v) = streak.good_days {
            config.streak_good_days = v;
        }
    }

    if let Some(display) = raw.display {
        if let Some(label) = display.currency_label {
            config.currency_label = label;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &InsightsConfig) -> Result<()> {
    if config.recurring_rounding_step <= Decimal::ZERO {
        return Err(Error::Config(
            "recurring.rounding_step must be positive".to_string(),
        ));
    }
    if config.budget_warning_percentage > config.budget_over_percentage {
        return Err(Error::Config(
            "budgets.warning_percentage must not exceed budgets.over_percentage".to_string(),
        ));
    }
    if config.zero_budget_percentage < config.budget_over_percentage {
        return Err(Error::Config(
            "budgets.zero_budget_percentage must be at least budgets.over_percentage".to_string(),
        ));
    }
    if config.worst_case_factor < Decimal::ONE {
        return Err(Error::Config(
            "forecast.worst_case_factor must be at least 1".to_string(),
        ));
    }
    Ok(())
}
