//! Portfolio state: target allocation, holdings, profile figures.

use chrono::{DateTime, NaiveDate, Utc};

use super::allocation::AssetAllocation;
use super::fund::Fund;
use super::presets::{age_on, PresetTable};
use super::user::User;

/// Share of salary set aside for investment when the user has not chosen one.
pub const DEFAULT_INVESTMENT_PERCENTAGE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub user_id: String,
    pub last_rebalanced: DateTime<Utc>,
    pub salary: f64,
    pub investment_percentage: f64,
    /// True once the user overrides the age-derived target allocation.
    pub custom_allocation: bool,
    /// Target allocation, age-derived at creation.
    pub allocation: AssetAllocation,
    pub funds: Vec<Fund>,
}

impl Portfolio {
    /// A fresh portfolio for `user`, target allocation seeded from the user's
    /// age bracket on `today`.
    pub fn seeded(user: &User, table: &PresetTable, today: NaiveDate, now: DateTime<Utc>) -> Self {
        let age = age_on(today, user.date_of_birth);
        let preset = table.resolve_bracket(age);
        Portfolio {
            user_id: user.id.clone(),
            last_rebalanced: now,
            salary: 0.0,
            investment_percentage: DEFAULT_INVESTMENT_PERCENTAGE,
            custom_allocation: false,
            allocation: preset.allocation,
            funds: Vec::new(),
        }
    }

    /// Total current market value across all funds.
    pub fn total_value(&self) -> f64 {
        self.funds.iter().map(|f| f.current_value).sum()
    }

    /// Total amount originally invested across all funds.
    pub fn total_invested(&self) -> f64 {
        self.funds.iter().map(|f| f.invested_amount).sum()
    }

    pub fn fund(&self, fund_id: &str) -> Option<&Fund> {
        self.funds.iter().find(|f| f.id == fund_id)
    }
}
