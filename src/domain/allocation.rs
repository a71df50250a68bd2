//! Asset allocation percentages and per-category currency amounts.

use super::category::FundCategory;

/// Target or current allocation: an integer percentage per category.
///
/// Intended to sum to 100 but never enforced: current allocations are
/// rounded per category independently and may drift a few points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetAllocation {
    pub gold: u32,
    pub nifty50: u32,
    pub flexi_cap: u32,
    pub mid_cap: u32,
    pub debt_hybrid: u32,
    pub conservative: u32,
}

impl AssetAllocation {
    pub const ZERO: AssetAllocation = AssetAllocation {
        gold: 0,
        nifty50: 0,
        flexi_cap: 0,
        mid_cap: 0,
        debt_hybrid: 0,
        conservative: 0,
    };

    pub const fn new(
        gold: u32,
        nifty50: u32,
        flexi_cap: u32,
        mid_cap: u32,
        debt_hybrid: u32,
        conservative: u32,
    ) -> Self {
        AssetAllocation {
            gold,
            nifty50,
            flexi_cap,
            mid_cap,
            debt_hybrid,
            conservative,
        }
    }

    pub fn get(&self, category: FundCategory) -> u32 {
        match category {
            FundCategory::Gold => self.gold,
            FundCategory::Nifty50 => self.nifty50,
            FundCategory::FlexiCap => self.flexi_cap,
            FundCategory::MidCap => self.mid_cap,
            FundCategory::DebtHybrid => self.debt_hybrid,
            FundCategory::Conservative => self.conservative,
        }
    }

    pub fn set(&mut self, category: FundCategory, pct: u32) {
        match category {
            FundCategory::Gold => self.gold = pct,
            FundCategory::Nifty50 => self.nifty50 = pct,
            FundCategory::FlexiCap => self.flexi_cap = pct,
            FundCategory::MidCap => self.mid_cap = pct,
            FundCategory::DebtHybrid => self.debt_hybrid = pct,
            FundCategory::Conservative => self.conservative = pct,
        }
    }

    /// (category, percentage) pairs in [`FundCategory::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (FundCategory, u32)> + '_ {
        FundCategory::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, pct)| pct).sum()
    }
}

/// A currency amount per category. Used for rebalancing deltas (positive =
/// buy more, negative = reduce) and investment plans.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryAmounts {
    pub gold: f64,
    pub nifty50: f64,
    pub flexi_cap: f64,
    pub mid_cap: f64,
    pub debt_hybrid: f64,
    pub conservative: f64,
}

impl CategoryAmounts {
    pub fn get(&self, category: FundCategory) -> f64 {
        match category {
            FundCategory::Gold => self.gold,
            FundCategory::Nifty50 => self.nifty50,
            FundCategory::FlexiCap => self.flexi_cap,
            FundCategory::MidCap => self.mid_cap,
            FundCategory::DebtHybrid => self.debt_hybrid,
            FundCategory::Conservative => self.conservative,
        }
    }

    pub fn set(&mut self, category: FundCategory, amount: f64) {
        match category {
            FundCategory::Gold => self.gold = amount,
            FundCategory::Nifty50 => self.nifty50 = amount,
            FundCategory::FlexiCap => self.flexi_cap = amount,
            FundCategory::MidCap => self.mid_cap = amount,
            FundCategory::DebtHybrid => self.debt_hybrid = amount,
            FundCategory::Conservative => self.conservative = amount,
        }
    }

    pub fn add(&mut self, category: FundCategory, amount: f64) {
        self.set(category, self.get(category) + amount);
    }

    /// (category, amount) pairs in [`FundCategory::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (FundCategory, f64)> + '_ {
        FundCategory::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, amount)| amount).sum()
    }
}
