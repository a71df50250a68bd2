//! Portfolio store port trait.

use chrono::{DateTime, Utc};

use crate::domain::error::FundfolioError;
use crate::domain::fund::{Fund, NewFund};
use crate::domain::portfolio::Portfolio;
use crate::domain::presets::PresetTable;
use crate::domain::user::User;

/// One portfolio per user, keyed by user id.
pub trait PortfolioStore {
    /// Create a portfolio for `user`, target allocation seeded from the
    /// user's age bracket at `now`.
    fn create(
        &self,
        user: &User,
        presets: &PresetTable,
        now: DateTime<Utc>,
    ) -> Result<Portfolio, FundfolioError>;

    fn get(&self, user_id: &str) -> Option<Portfolio>;

    /// Replace the stored portfolio wholesale. Fails when the user id is
    /// unknown.
    fn replace(&self, portfolio: Portfolio) -> Result<Portfolio, FundfolioError>;

    /// Add a fund to the user's portfolio, assigning it a fresh id.
    fn add_fund(&self, user_id: &str, fund: NewFund) -> Result<Fund, FundfolioError>;

    /// Replace a fund in place, matched by fund id.
    fn update_fund(&self, user_id: &str, fund: Fund) -> Result<Fund, FundfolioError>;

    fn remove_fund(&self, user_id: &str, fund_id: &str) -> Result<(), FundfolioError>;

    /// Stamp the portfolio as freshly rebalanced at `now`.
    fn touch_rebalanced(&self, user_id: &str, now: DateTime<Utc>) -> Result<(), FundfolioError>;
}
