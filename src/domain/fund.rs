//! Fund holdings owned by a portfolio.

use uuid::Uuid;

use super::category::FundCategory;

#[derive(Debug, Clone, PartialEq)]
pub struct Fund {
    pub id: String,
    pub name: String,
    pub category: FundCategory,
    /// Current market value of the holding.
    pub current_value: f64,
    /// Amount originally invested.
    pub invested_amount: f64,
}

impl Fund {
    /// Unrealised gain (negative for a loss).
    pub fn gain(&self) -> f64 {
        self.current_value - self.invested_amount
    }
}

/// A fund as submitted by the user, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFund {
    pub name: String,
    pub category: FundCategory,
    pub current_value: f64,
    pub invested_amount: f64,
}

impl NewFund {
    pub fn into_fund(self) -> Fund {
        Fund {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            category: self.category,
            current_value: self.current_value,
            invested_amount: self.invested_amount,
        }
    }
}

/// Group funds by category, in [`FundCategory::ALL`] order. Every category is
/// present, empty or not.
pub fn group_by_category(funds: &[Fund]) -> Vec<(FundCategory, Vec<&Fund>)> {
    FundCategory::ALL
        .iter()
        .map(|&category| {
            let group = funds.iter().filter(|f| f.category == category).collect();
            (category, group)
        })
        .collect()
}
