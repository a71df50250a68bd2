//! In-memory portfolio store adapter.

use std::cell::RefCell;

use chrono::{DateTime, Utc};

use crate::domain::allocation::AssetAllocation;
use crate::domain::category::FundCategory;
use crate::domain::error::FundfolioError;
use crate::domain::fund::{Fund, NewFund};
use crate::domain::portfolio::Portfolio;
use crate::domain::presets::PresetTable;
use crate::domain::user::User;
use crate::ports::portfolio_store::PortfolioStore;

use super::memory_user_store::DEMO_USER_ID;

pub struct MemoryPortfolioStore {
    portfolios: RefCell<Vec<Portfolio>>,
}

impl MemoryPortfolioStore {
    pub fn new() -> Self {
        MemoryPortfolioStore {
            portfolios: RefCell::new(Vec::new()),
        }
    }

    /// A store pre-seeded with the demo portfolio: four holdings matching the
    /// 25-30 bracket target, last rebalanced long enough ago to trip the
    /// elapsed-time rule.
    pub fn with_demo_portfolio(now: DateTime<Utc>) -> Self {
        let demo_fund = |id: &str, name: &str, category, current_value, invested_amount| Fund {
            id: id.to_string(),
            name: name.to_string(),
            category,
            current_value,
            invested_amount,
        };

        let store = Self::new();
        store.portfolios.borrow_mut().push(Portfolio {
            user_id: DEMO_USER_ID.to_string(),
            last_rebalanced: now - chrono::Duration::days(1000),
            salary: 100000.0,
            investment_percentage: 20.0,
            custom_allocation: false,
            allocation: AssetAllocation::new(20, 30, 25, 25, 0, 0),
            funds: vec![
                demo_fund("1", "SBI Gold Fund", FundCategory::Gold, 20000.0, 18000.0),
                demo_fund(
                    "2",
                    "HDFC Nifty 50 Index Fund",
                    FundCategory::Nifty50,
                    30000.0,
                    27000.0,
                ),
                demo_fund(
                    "3",
                    "ICICI Prudential Flexicap Fund",
                    FundCategory::FlexiCap,
                    25000.0,
                    22000.0,
                ),
                demo_fund("4", "Kotak Midcap Fund", FundCategory::MidCap, 25000.0, 23000.0),
            ],
        });
        store
    }
}

impl Default for MemoryPortfolioStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioStore for MemoryPortfolioStore {
    fn create(
        &self,
        user: &User,
        presets: &PresetTable,
        now: DateTime<Utc>,
    ) -> Result<Portfolio, FundfolioError> {
        let portfolio = Portfolio::seeded(user, presets, now.date_naive(), now);
        self.portfolios.borrow_mut().push(portfolio.clone());
        Ok(portfolio)
    }

    fn get(&self, user_id: &str) -> Option<Portfolio> {
        self.portfolios
            .borrow()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
    }

    fn replace(&self, portfolio: Portfolio) -> Result<Portfolio, FundfolioError> {
        let mut portfolios = self.portfolios.borrow_mut();
        let existing = portfolios
            .iter_mut()
            .find(|p| p.user_id == portfolio.user_id)
            .ok_or(FundfolioError::PortfolioNotFound)?;
        *existing = portfolio.clone();
        Ok(portfolio)
    }

    fn add_fund(&self, user_id: &str, fund: NewFund) -> Result<Fund, FundfolioError> {
        let mut portfolios = self.portfolios.borrow_mut();
        let portfolio = portfolios
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or(FundfolioError::PortfolioNotFound)?;

        let fund = fund.into_fund();
        portfolio.funds.push(fund.clone());
        Ok(fund)
    }

    fn update_fund(&self, user_id: &str, fund: Fund) -> Result<Fund, FundfolioError> {
        let mut portfolios = self.portfolios.borrow_mut();
        let portfolio = portfolios
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or(FundfolioError::PortfolioNotFound)?;

        let slot = portfolio
            .funds
            .iter_mut()
            .find(|f| f.id == fund.id)
            .ok_or(FundfolioError::FundNotFound)?;
        *slot = fund.clone();
        Ok(fund)
    }

    fn remove_fund(&self, user_id: &str, fund_id: &str) -> Result<(), FundfolioError> {
        let mut portfolios = self.portfolios.borrow_mut();
        let portfolio = portfolios
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or(FundfolioError::PortfolioNotFound)?;

        let index = portfolio
            .funds
            .iter()
            .position(|f| f.id == fund_id)
            .ok_or(FundfolioError::FundNotFound)?;
        portfolio.funds.remove(index);
        Ok(())
    }

    fn touch_rebalanced(&self, user_id: &str, now: DateTime<Utc>) -> Result<(), FundfolioError> {
        let mut portfolios = self.portfolios.borrow_mut();
        let portfolio = portfolios
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or(FundfolioError::PortfolioNotFound)?;
        portfolio.last_rebalanced = now;
        Ok(())
    }
}
