//! Integration tests for tally-core
//!
//! These tests exercise the full snapshot → store → engine workflow.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use tally_core::{
    insights::{BudgetStatus, ForecastScenario, RecurringExpense, Trend},
    money::round_whole,
    AnalyticsPeriod, GoalPlanner, GoalStore, InsightsConfig, InsightsEngine, MemoryStore,
    NewGoal, NewTransaction, PeriodAnalytics, SettingsPatch, SettingsStore, Snapshot,
    TransactionStore, TransactionType,
};

const USER: &str = "demo";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A snapshot as another frontend might have written it: numbers as strings,
/// a missing category, a bad date and an unknown type mixed in
fn messy_snapshot() -> Snapshot {
    serde_json::from_value(json!({
        "settings": {
            "monthly_income": 5000000,
            "fixed_expenses": 2000000,
            "budgets": {"Food": 40000, "Transport": 100000, "Gifts": 0},
            "onboarding_completed": true
        },
        "transactions": [
            {"id": "p1", "type": "expense", "amount": 1000000, "date": "2026-03-12", "category": "Rent"},
            {"id": "c1", "type": "expense", "amount": "50000", "date": "2026-04-10", "category": "Food"},
            {"id": "c2", "type": "expense", "amount": 15200, "date": "2026-04-03", "category": "Transport"},
            {"id": "c3", "type": "expense", "amount": 14800, "date": "2026-04-05", "category": "Transport"},
            {"id": "c4", "type": "expense", "amount": 15500, "date": "2026-04-08", "category": "Transport"},
            {"id": "c5", "type": "expense", "amount": 4500, "date": "2026-04-09"},
            {"id": "bad-date", "type": "expense", "amount": 900000, "date": "04/09/2026", "category": "Food"},
            {"id": "bad-amount", "type": "expense", "amount": "a lot", "date": "2026-04-09", "category": "Food"},
            {"id": "transfer", "type": "transfer", "amount": 100, "date": "2026-04-09"},
            {"id": "salary", "type": "income", "amount": 5000000, "date": "2026-04-01"}
        ],
        "goals": [
            {"id": "g1", "title": "Laptop", "target_amount": 6000000, "current_amount": 1500000}
        ]
    }))
    .unwrap()
}

// =============================================================================
// Store → Engine Workflow
// =============================================================================

#[test]
fn test_snapshot_to_insights_workflow() {
    let store = MemoryStore::from_snapshot(USER, messy_snapshot());
    let transactions = store.load_transactions(USER).unwrap();
    let settings = store.load_settings(USER).unwrap();

    // the unknown type is dropped, the rest are repaired
    assert_eq!(transactions.len(), 9);
    let uncategorized = transactions.iter().find(|t| t.id == "c5").unwrap();
    assert_eq!(uncategorized.category, "Other");
    let undated = transactions.iter().find(|t| t.id == "bad-date").unwrap();
    assert!(undated.date.is_none());

    let engine = InsightsEngine::new(&transactions, &settings, date(2026, 4, 10));
    let insights = engine.all_insights(&settings.budgets);

    // the undated 900,000 never reaches month-scoped figures
    assert_eq!(insights.comparison.current, dec!(100000));
    assert_eq!(insights.comparison.previous, dec!(1000000));
    assert_eq!(insights.comparison.trend, Trend::Down);
    assert_eq!(insights.comparison.percentage, dec!(-90));

    assert_eq!(insights.daily_limit.daily_limit, dec!(100000));
    assert_eq!(insights.daily_limit.days_remaining, 21);

    let overspent: Vec<(&str, BudgetStatus)> = insights
        .overspending
        .iter()
        .map(|o| (o.category.as_str(), o.status))
        .collect();
    assert_eq!(overspent, vec![("Food", BudgetStatus::Over)]);

    assert_eq!(
        insights.recurring_expenses,
        vec![RecurringExpense {
            category: "Transport".to_string(),
            amount: dec!(15000),
            count: 3,
            total: dec!(45500),
        }]
    );

    let top = insights.top_spending.top_category.unwrap();
    assert_eq!(top.name, "Food");
    assert_eq!(top.amount, dec!(50000));

    let titles: Vec<&str> = insights
        .automatic_insights
        .iter()
        .map(|c| c.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Top spending category", "Savings opportunity", "Spending down"]
    );
}

#[test]
fn test_store_writes_feed_back_into_engine() {
    let store = MemoryStore::new();
    store
        .complete_onboarding(USER, dec!(3000000), dec!(0), None)
        .unwrap();

    let saved = store
        .save_transaction(
            USER,
            NewTransaction {
                id: None,
                kind: TransactionType::Expense,
                amount: dec!(250000),
                date: date(2026, 4, 2),
                category: Some("Shopping".to_string()),
                description: Some("Coat".to_string()),
                created_at: None,
            },
        )
        .unwrap();

    let transactions = store.load_transactions(USER).unwrap();
    let settings = store.load_settings(USER).unwrap();
    let engine = InsightsEngine::new(&transactions, &settings, date(2026, 4, 2));
    assert_eq!(engine.month_spend(0), dec!(250000));
    // Apr 2 is over the 100,000 flat limit
    assert_eq!(engine.spending_streak().days, 0);

    store.delete_transaction(USER, &saved.id).unwrap();
    let transactions = store.load_transactions(USER).unwrap();
    let engine = InsightsEngine::new(&transactions, &settings, date(2026, 4, 2));
    assert_eq!(engine.month_spend(0), Decimal::ZERO);
    assert_eq!(engine.spending_streak().days, 2);
}

#[test]
fn test_snapshot_export_reloads_identically() {
    let store = MemoryStore::from_snapshot(USER, messy_snapshot());
    let exported = store.to_snapshot(USER).unwrap();
    let reloaded = MemoryStore::from_snapshot(USER, exported);

    assert_eq!(
        reloaded.load_transactions(USER).unwrap(),
        store.load_transactions(USER).unwrap()
    );
    assert_eq!(
        reloaded.load_settings(USER).unwrap(),
        store.load_settings(USER).unwrap()
    );
    assert_eq!(reloaded.load_goals(USER).unwrap(), store.load_goals(USER).unwrap());
}

// =============================================================================
// Reference Scenarios
// =============================================================================

fn engine_settings(income: Decimal, fixed: Decimal) -> tally_core::Settings {
    let store = MemoryStore::new();
    store
        .save_settings(
            USER,
            SettingsPatch {
                monthly_income: Some(income),
                fixed_expenses: Some(fixed),
                onboarding_completed: Some(true),
                ..Default::default()
            },
        )
        .unwrap()
}

fn expense_snapshot(entries: &[(&str, Decimal, &str)]) -> Vec<tally_core::Transaction> {
    let store = MemoryStore::new();
    for (category, amount, on) in entries {
        store
            .save_transaction(
                USER,
                NewTransaction {
                    id: None,
                    kind: TransactionType::Expense,
                    amount: *amount,
                    date: NaiveDate::parse_from_str(on, "%Y-%m-%d").unwrap(),
                    category: Some(category.to_string()),
                    description: None,
                    created_at: None,
                },
            )
            .unwrap();
    }
    store.load_transactions(USER).unwrap()
}

#[test]
fn test_scenario_daily_limit_on_first_day() {
    let settings = engine_settings(dec!(5000000), dec!(2000000));
    let engine = InsightsEngine::new(&[], &settings, date(2026, 6, 1));
    let limit = engine.daily_spending_limit();

    assert_eq!(limit.daily_limit, dec!(100000));
    assert_eq!(limit.daily_remaining, dec!(100000));
    assert_eq!(limit.days_remaining, 30);
}

#[test]
fn test_scenario_food_over_budget() {
    let txs = expense_snapshot(&[("Food", dec!(50000), "2026-06-14")]);
    let settings = engine_settings(dec!(0), dec!(0));
    let engine = InsightsEngine::new(&txs, &settings, date(2026, 6, 14));

    let mut budgets = BTreeMap::new();
    budgets.insert("Food".to_string(), dec!(40000));
    let result = engine.category_overspending(&budgets);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].spent, dec!(50000));
    assert_eq!(result[0].remaining, dec!(-10000));
    assert_eq!(result[0].percentage, dec!(125));
    assert_eq!(result[0].status, BudgetStatus::Over);
}

#[test]
fn test_scenario_forecast_projection() {
    let txs = expense_snapshot(&[
        ("Food", dec!(120000), "2026-06-02"),
        ("Rent", dec!(180000), "2026-06-09"),
    ]);
    let settings = engine_settings(dec!(2000000), dec!(0));
    let engine = InsightsEngine::new(&txs, &settings, date(2026, 6, 10));
    let forecast = engine.month_end_forecast();

    assert_eq!(forecast.avg_daily_spending, dec!(30000));
    assert_eq!(forecast.days_remaining, 20);
    assert_eq!(forecast.projected_spending, dec!(900000));
    assert_eq!(forecast.forecast_balance, dec!(1100000));
    assert_eq!(forecast.scenario, ForecastScenario::Positive);
}

#[test]
fn test_scenario_month_over_month_increase() {
    let txs = expense_snapshot(&[
        ("Rent", dec!(1000000), "2026-05-20"),
        ("Rent", dec!(1300000), "2026-06-03"),
    ]);
    let settings = engine_settings(dec!(0), dec!(0));
    let engine = InsightsEngine::new(&txs, &settings, date(2026, 6, 10));
    let comparison = engine.period_comparison();

    assert_eq!(comparison.difference, dec!(300000));
    assert_eq!(comparison.percentage, dec!(30));
    assert_eq!(comparison.trend, Trend::Up);
}

#[test]
fn test_scenario_recurring_transport() {
    let txs = expense_snapshot(&[
        ("Transport", dec!(15200), "2026-06-01"),
        ("Transport", dec!(14800), "2026-06-04"),
        ("Transport", dec!(15500), "2026-06-07"),
    ]);
    let settings = engine_settings(dec!(0), dec!(0));
    let engine = InsightsEngine::new(&txs, &settings, date(2026, 6, 10));

    let groups = engine.recurring_expenses();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].amount, dec!(15000));
    assert_eq!(groups[0].count, 3);
    assert_eq!(groups[0].total, dec!(45500));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_zero_previous_month_always_zero_percentage() {
    let settings = engine_settings(dec!(0), dec!(0));
    for amount in [dec!(0), dec!(1), dec!(999999)] {
        let txs = expense_snapshot(&[("Food", amount, "2026-06-05")]);
        let engine = InsightsEngine::new(&txs, &settings, date(2026, 6, 10));
        assert_eq!(engine.period_comparison().percentage, Decimal::ZERO);
    }
}

#[test]
fn test_daily_remaining_without_transactions() {
    let settings = engine_settings(dec!(3100000), dec!(100000));
    for day in 1..=31 {
        let engine = InsightsEngine::new(&[], &settings, date(2026, 7, day));
        let limit = engine.daily_spending_limit();
        let expected = round_whole(dec!(3000000) / Decimal::from(limit.days_remaining));

        assert_eq!(limit.daily_limit, dec!(96774));
        assert_eq!(limit.daily_remaining, expected);
        assert!(limit.daily_remaining >= limit.daily_limit);
        assert_eq!(limit.days_remaining, 32 - day);
    }
}

#[test]
fn test_every_insight_is_idempotent() {
    let store = MemoryStore::from_snapshot(USER, messy_snapshot());
    let transactions = store.load_transactions(USER).unwrap();
    let settings = store.load_settings(USER).unwrap();
    let engine = InsightsEngine::new(&transactions, &settings, date(2026, 4, 10));

    assert_eq!(
        engine.all_insights(&settings.budgets),
        engine.all_insights(&settings.budgets)
    );
    assert_eq!(engine.automatic_insights(), engine.automatic_insights());
}

#[test]
fn test_custom_config_changes_recurring_step() {
    let txs = expense_snapshot(&[
        ("Cafe", dec!(21000), "2026-06-01"),
        ("Cafe", dec!(24000), "2026-06-02"),
        ("Cafe", dec!(18000), "2026-06-03"),
    ]);
    let settings = engine_settings(dec!(0), dec!(0));
    let config = InsightsConfig {
        recurring_rounding_step: dec!(10000),
        ..Default::default()
    };
    let engine = InsightsEngine::new(&txs, &settings, date(2026, 6, 10)).with_config(config);

    let groups = engine.recurring_expenses();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].amount, dec!(20000));
    assert_eq!(groups[0].count, 3);
}

// =============================================================================
// Goals and Analytics
// =============================================================================

#[test]
fn test_goal_plan_from_store() {
    let store = MemoryStore::from_snapshot(USER, messy_snapshot());
    store
        .save_goal(
            USER,
            NewGoal {
                id: None,
                title: "Trip".to_string(),
                description: None,
                target_amount: dec!(1000000),
                current_amount: dec!(0),
                deadline: Some(date(2026, 4, 20)),
                status: None,
            },
        )
        .unwrap();

    let transactions = store.load_transactions(USER).unwrap();
    let settings = store.load_settings(USER).unwrap();
    let goals = store.load_goals(USER).unwrap();
    let plan = GoalPlanner::new(&transactions, &settings, date(2026, 4, 10)).plan(&goals);

    // 3,000,000 available minus 100,000 spent, over 21 days
    assert_eq!(plan.available_for_savings, dec!(2900000));
    assert_eq!(plan.recommended_daily, dec!(138095));
    assert_eq!(plan.goals.len(), 2);
    // Laptop: 4,500,000 over 30 days would be 150,000; capped by the daily pace
    assert_eq!(plan.goals[0].daily_for_goal, dec!(138095));
    assert_eq!(plan.goals[0].progress_percentage, dec!(25));
    // Trip: 1,000,000 over 10 days
    assert_eq!(plan.goals[1].daily_for_goal, dec!(100000));
}

#[test]
fn test_analytics_counts_undated_only_for_all() {
    let store = MemoryStore::from_snapshot(USER, messy_snapshot());
    let transactions = store.load_transactions(USER).unwrap();

    let all = PeriodAnalytics::compute(&transactions, date(2026, 4, 10), AnalyticsPeriod::All);
    let month = PeriodAnalytics::compute(&transactions, date(2026, 4, 10), AnalyticsPeriod::Month);

    assert_eq!(all.summary.expenses, dec!(2000000));
    assert_eq!(month.summary.expenses, dec!(100000));
    assert_eq!(month.summary.incomes, dec!(5000000));
    assert_eq!(all.trend.percentage, dec!(-90));
}
