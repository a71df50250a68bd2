//! User store port trait.

use crate::domain::error::FundfolioError;
use crate::domain::user::User;

/// Account registry. All matching is by-value and case-sensitive; emails are
/// the unique key.
pub trait UserStore {
    /// Register a new account. Fails with [`FundfolioError::DuplicateEmail`]
    /// when the email is already registered, leaving the existing record
    /// untouched.
    fn create(&self, user: User) -> Result<User, FundfolioError>;

    /// Exact-match login. Fails with a single undifferentiated
    /// [`FundfolioError::InvalidCredentials`]: no hint which field was wrong.
    fn authenticate(&self, email: &str, password: &str) -> Result<User, FundfolioError>;

    fn get(&self, id: &str) -> Option<User>;

    /// Update an account in place. The stored email always wins: email edits
    /// are silently discarded.
    fn update(&self, user: User) -> Result<User, FundfolioError>;

    /// Simulated reset-link flow: verifies the email exists, then pauses for
    /// the configured delay before resolving. No retry, no cancellation.
    fn reset_password(&self, email: &str) -> Result<(), FundfolioError>;
}
