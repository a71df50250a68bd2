//! Fund categories.

use std::fmt;
use std::str::FromStr;

/// A parse error for an unrecognised category name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown fund category: {0}")]
pub struct ParseCategoryError(pub String);

/// The six mutual-fund categories a holding can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundCategory {
    Gold,
    Nifty50,
    FlexiCap,
    MidCap,
    DebtHybrid,
    Conservative,
}

impl FundCategory {
    /// All categories in declaration order. Allocation tables and reports
    /// iterate in this order.
    pub const ALL: [FundCategory; 6] = [
        FundCategory::Gold,
        FundCategory::Nifty50,
        FundCategory::FlexiCap,
        FundCategory::MidCap,
        FundCategory::DebtHybrid,
        FundCategory::Conservative,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FundCategory::Gold => "Gold",
            FundCategory::Nifty50 => "Nifty50",
            FundCategory::FlexiCap => "FlexiCap",
            FundCategory::MidCap => "MidCap",
            FundCategory::DebtHybrid => "DebtHybrid",
            FundCategory::Conservative => "Conservative",
        }
    }

    /// Key used in config files: the canonical name lowercased.
    pub fn config_key(&self) -> &'static str {
        match self {
            FundCategory::Gold => "gold",
            FundCategory::Nifty50 => "nifty50",
            FundCategory::FlexiCap => "flexicap",
            FundCategory::MidCap => "midcap",
            FundCategory::DebtHybrid => "debthybrid",
            FundCategory::Conservative => "conservative",
        }
    }
}

impl fmt::Display for FundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FundCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Gold" => Ok(FundCategory::Gold),
            "Nifty50" => Ok(FundCategory::Nifty50),
            "FlexiCap" => Ok(FundCategory::FlexiCap),
            "MidCap" => Ok(FundCategory::MidCap),
            "DebtHybrid" => Ok(FundCategory::DebtHybrid),
            "Conservative" => Ok(FundCategory::Conservative),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}
