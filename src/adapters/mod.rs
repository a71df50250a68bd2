//! Concrete adapter implementations for ports.

pub mod memory_user_store;
pub mod memory_portfolio_store;
pub mod json_session_adapter;
pub mod file_config_adapter;
pub mod csv_fund_adapter;
