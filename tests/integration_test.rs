//! Integration tests for the registration-to-rebalancing pipeline.
//!
//! Tests cover:
//! - Registration seeding a portfolio from the user's age bracket
//! - Duplicate registration and bad credentials leaving stores untouched
//! - Fund CRUD round-trips through the portfolio store
//! - The allocation engine over store-held portfolios
//! - Session persistence round-trip, including corrupt-session recovery

mod common;

use std::time::Duration;

use chrono::Utc;
use common::*;
use fundfolio::adapters::json_session_adapter::JsonSessionAdapter;
use fundfolio::adapters::memory_portfolio_store::MemoryPortfolioStore;
use fundfolio::adapters::memory_user_store::{MemoryUserStore, DEMO_EMAIL, DEMO_PASSWORD};
use fundfolio::domain::allocation::AssetAllocation;
use fundfolio::domain::category::FundCategory;
use fundfolio::domain::engine::{
    current_allocation, rebalancing_needed, rebalancing_recommendations,
};
use fundfolio::domain::error::FundfolioError;
use fundfolio::domain::presets::{AgeRange, PresetTable};
use fundfolio::ports::portfolio_store::PortfolioStore;
use fundfolio::ports::session_store::SessionStore;
use fundfolio::ports::user_store::UserStore;

fn user_store() -> MemoryUserStore {
    MemoryUserStore::new().with_reset_delay(Duration::ZERO)
}

mod registration {
    use super::*;

    #[test]
    fn register_then_seed_portfolio_from_age_bracket() {
        let users = user_store();
        let portfolios = MemoryPortfolioStore::new();
        let table = PresetTable::default();
        let now = Utc::now();

        // Chosen so the user is 42 at `now`.
        let dob = now.date_naive() - chrono::Duration::days(42 * 365 + 200);
        let user = users.create(sample_user("amy@example.com", dob)).unwrap();
        let portfolio = portfolios.create(&user, &table, now).unwrap();

        assert_eq!(
            portfolio.allocation,
            table.allocation_for_range(AgeRange::new(40, 45))
        );
        assert!(!portfolio.custom_allocation);
        assert_eq!(portfolios.get(&user.id).unwrap(), portfolio);
    }

    #[test]
    fn duplicate_email_leaves_both_stores_untouched() {
        let users = user_store();
        let portfolios = MemoryPortfolioStore::new();
        let table = PresetTable::default();
        let now = Utc::now();

        let dob = date(1990, 1, 1);
        let first = users.create(sample_user("amy@example.com", dob)).unwrap();
        portfolios.create(&first, &table, now).unwrap();

        let err = users
            .create(sample_user("amy@example.com", dob))
            .unwrap_err();
        assert!(matches!(err, FundfolioError::DuplicateEmail));
        assert_eq!(users.user_count(), 1);
        assert_eq!(users.get(&first.id).unwrap(), first);
    }

    #[test]
    fn login_then_fetch_portfolio() {
        let now = Utc::now();
        let users = MemoryUserStore::with_demo_user(now);
        let portfolios = MemoryPortfolioStore::with_demo_portfolio(now);

        let user = users.authenticate(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        let portfolio = portfolios.get(&user.id).unwrap();
        assert_eq!(portfolio.user_id, user.id);
        assert_eq!(portfolio.funds.len(), 4);
    }

    #[test]
    fn failed_login_names_no_field() {
        let users = MemoryUserStore::with_demo_user(Utc::now());
        let err = users.authenticate(DEMO_EMAIL, "nope").unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
        let err = users.authenticate("nobody@example.com", DEMO_PASSWORD).unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
    }
}

mod fund_crud {
    use super::*;

    #[test]
    fn add_update_remove_round_trip() {
        let users = user_store();
        let portfolios = MemoryPortfolioStore::new();
        let table = PresetTable::default();
        let now = Utc::now();

        let user = users
            .create(sample_user("amy@example.com", date(1994, 7, 1)))
            .unwrap();
        portfolios.create(&user, &table, now).unwrap();
        let initial_funds = portfolios.get(&user.id).unwrap().funds;

        let gold = portfolios
            .add_fund(&user.id, make_new_fund("SBI Gold Fund", FundCategory::Gold, 20000.0))
            .unwrap();
        let nifty = portfolios
            .add_fund(
                &user.id,
                make_new_fund("HDFC Nifty 50 Index Fund", FundCategory::Nifty50, 30000.0),
            )
            .unwrap();

        let mut updated = gold.clone();
        updated.current_value = 22000.0;
        portfolios.update_fund(&user.id, updated).unwrap();
        let stored = portfolios.get(&user.id).unwrap();
        assert!((stored.fund(&gold.id).unwrap().current_value - 22000.0).abs() < f64::EPSILON);

        portfolios.remove_fund(&user.id, &gold.id).unwrap();
        portfolios.remove_fund(&user.id, &nifty.id).unwrap();
        assert_eq!(portfolios.get(&user.id).unwrap().funds, initial_funds);
    }

    #[test]
    fn operations_against_unknown_portfolio_fail() {
        let portfolios = MemoryPortfolioStore::new();
        let err = portfolios
            .add_fund("ghost", make_new_fund("X", FundCategory::Gold, 1.0))
            .unwrap_err();
        assert!(matches!(err, FundfolioError::PortfolioNotFound));

        let err = portfolios.remove_fund("ghost", "1").unwrap_err();
        assert!(matches!(err, FundfolioError::PortfolioNotFound));

        let err = portfolios.touch_rebalanced("ghost", Utc::now()).unwrap_err();
        assert!(matches!(err, FundfolioError::PortfolioNotFound));
    }
}

mod engine_pipeline {
    use super::*;

    #[test]
    fn demo_portfolio_is_flagged_by_elapsed_time() {
        let now = Utc::now();
        let portfolios = MemoryPortfolioStore::with_demo_portfolio(now);
        let table = PresetTable::default();
        let portfolio = portfolios.get("1").unwrap();

        // Holdings match the target exactly; only the stale stamp triggers.
        let current = current_allocation(&portfolio.funds, &table);
        assert_eq!(current, portfolio.allocation);
        assert!(rebalancing_needed(&portfolio, &table, now));
    }

    #[test]
    fn touch_rebalanced_clears_the_time_trigger() {
        let now = Utc::now();
        let portfolios = MemoryPortfolioStore::with_demo_portfolio(now);
        let table = PresetTable::default();

        portfolios.touch_rebalanced("1", now).unwrap();
        let portfolio = portfolios.get("1").unwrap();
        assert!(!rebalancing_needed(&portfolio, &table, now));
    }

    #[test]
    fn drifted_holdings_produce_buy_and_reduce_amounts() {
        let now = Utc::now();
        let mut portfolio = balanced_portfolio("u1", now);
        // Gold runs up from 20k to 40k: portfolio value 120k, gold at 33%.
        portfolio.funds[0].current_value = 40000.0;
        let table = PresetTable::default();

        assert!(rebalancing_needed(&portfolio, &table, now));
        let recs = rebalancing_recommendations(&portfolio, &table);
        assert!(recs.get(FundCategory::Gold) < 0.0);
        assert!(recs.get(FundCategory::Nifty50) > 0.0);

        // Deltas inherit per-category rounding, so they net close to zero
        // but not exactly; bounded by a point of total value.
        assert!(recs.total().abs() <= 0.01 * portfolio.total_value());
    }

    #[test]
    fn replace_with_custom_allocation_changes_recommendations() {
        let users = user_store();
        let portfolios = MemoryPortfolioStore::new();
        let table = PresetTable::default();
        let now = Utc::now();

        let user = users
            .create(sample_user("amy@example.com", date(1994, 7, 1)))
            .unwrap();
        let mut portfolio = portfolios.create(&user, &table, now).unwrap();
        portfolios
            .add_fund(&user.id, make_new_fund("Gold", FundCategory::Gold, 10000.0))
            .unwrap();

        portfolio = portfolios.get(&user.id).unwrap();
        portfolio.custom_allocation = true;
        portfolio.allocation = AssetAllocation::new(50, 50, 0, 0, 0, 0);
        portfolios.replace(portfolio.clone()).unwrap();

        let recs = rebalancing_recommendations(&portfolio, &table);
        // Everything is in gold; half of it should move to Nifty50.
        assert!((recs.get(FundCategory::Nifty50) - 5000.0).abs() < 1e-9);
        assert!((recs.get(FundCategory::Gold) + 5000.0).abs() < 1e-9);
    }
}

mod session_persistence {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn login_session_survives_restart() {
        let dir = TempDir::new().unwrap();
        let users = MemoryUserStore::with_demo_user(Utc::now());
        let user = users.authenticate(DEMO_EMAIL, DEMO_PASSWORD).unwrap();

        let session = JsonSessionAdapter::new(dir.path().join("session.json"));
        session.save(&user).unwrap();

        // A fresh adapter over the same path stands in for the next run.
        let restored = JsonSessionAdapter::new(dir.path().join("session.json"));
        assert_eq!(restored.load(), Some(user));
    }

    #[test]
    fn corrupt_session_means_logged_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{\"id\": 12, \"truncated").unwrap();

        let session = JsonSessionAdapter::new(path);
        assert_eq!(session.load(), None);
    }

    #[test]
    fn clear_logs_the_user_out() {
        let dir = TempDir::new().unwrap();
        let users = MemoryUserStore::with_demo_user(Utc::now());
        let user = users.authenticate(DEMO_EMAIL, DEMO_PASSWORD).unwrap();

        let session = JsonSessionAdapter::new(dir.path().join("session.json"));
        session.save(&user).unwrap();
        session.clear().unwrap();
        assert_eq!(session.load(), None);
    }
}

mod password_reset {
    use super::*;

    #[test]
    fn reset_for_known_email_resolves() {
        let users = user_store();
        users
            .create(sample_user("amy@example.com", date(1990, 1, 1)))
            .unwrap();
        assert!(users.reset_password("amy@example.com").is_ok());
    }

    #[test]
    fn reset_for_unknown_email_fails() {
        let users = user_store();
        let err = users.reset_password("nobody@example.com").unwrap_err();
        assert_eq!(err.to_string(), "No account found with this email address");
    }
}
