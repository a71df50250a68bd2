#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fundfolio::domain::allocation::AssetAllocation;
use fundfolio::domain::category::FundCategory;
use fundfolio::domain::fund::{Fund, NewFund};
use fundfolio::domain::portfolio::Portfolio;
use fundfolio::domain::user::User;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn datetime(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn sample_user(email: &str, dob: NaiveDate) -> User {
    User::new("Test User", email, dob, "secret")
}

pub fn make_fund(name: &str, category: FundCategory, current_value: f64) -> Fund {
    Fund {
        id: name.to_string(),
        name: name.to_string(),
        category,
        current_value,
        invested_amount: current_value,
    }
}

pub fn make_new_fund(name: &str, category: FundCategory, current_value: f64) -> NewFund {
    NewFund {
        name: name.to_string(),
        category,
        current_value,
        invested_amount: current_value,
    }
}

/// A portfolio shaped like the demo account: four holdings matching the
/// 25-30 bracket target exactly.
pub fn balanced_portfolio(user_id: &str, last_rebalanced: DateTime<Utc>) -> Portfolio {
    Portfolio {
        user_id: user_id.to_string(),
        last_rebalanced,
        salary: 100000.0,
        investment_percentage: 20.0,
        custom_allocation: false,
        allocation: AssetAllocation::new(20, 30, 25, 25, 0, 0),
        funds: vec![
            make_fund("SBI Gold Fund", FundCategory::Gold, 20000.0),
            make_fund("HDFC Nifty 50 Index Fund", FundCategory::Nifty50, 30000.0),
            make_fund("ICICI Prudential Flexicap Fund", FundCategory::FlexiCap, 25000.0),
            make_fund("Kotak Midcap Fund", FundCategory::MidCap, 25000.0),
        ],
    }
}
