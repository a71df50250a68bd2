//! CSV holdings adapter.
//!
//! Loads a fund-holdings snapshot for the CLI. Expected columns, with a
//! header row: `name,category,current_value,invested_amount`. Fund ids are
//! assigned on load; the CSV itself carries none.

use std::fs;
use std::path::PathBuf;

use crate::domain::category::FundCategory;
use crate::domain::error::FundfolioError;
use crate::domain::fund::{Fund, NewFund};

pub struct CsvFundAdapter {
    path: PathBuf,
}

impl CsvFundAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Vec<Fund>, FundfolioError> {
        let content = fs::read_to_string(&self.path).map_err(|e| FundfolioError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut funds = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| FundfolioError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let name = record.get(0).ok_or_else(|| FundfolioError::Data {
                reason: "missing name column".into(),
            })?;

            let category: FundCategory = record
                .get(1)
                .ok_or_else(|| FundfolioError::Data {
                    reason: "missing category column".into(),
                })?
                .parse()
                .map_err(|e| FundfolioError::Data {
                    reason: format!("{}", e),
                })?;

            let current_value: f64 = record
                .get(2)
                .ok_or_else(|| FundfolioError::Data {
                    reason: "missing current_value column".into(),
                })?
                .parse()
                .map_err(|e| FundfolioError::Data {
                    reason: format!("invalid current_value: {}", e),
                })?;

            let invested_amount: f64 = record
                .get(3)
                .ok_or_else(|| FundfolioError::Data {
                    reason: "missing invested_amount column".into(),
                })?
                .parse()
                .map_err(|e| FundfolioError::Data {
                    reason: format!("invalid invested_amount: {}", e),
                })?;

            funds.push(
                NewFund {
                    name: name.to_string(),
                    category,
                    current_value,
                    invested_amount,
                }
                .into_fund(),
            );
        }

        Ok(funds)
    }
}
