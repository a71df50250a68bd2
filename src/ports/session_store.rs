//! Session persistence port trait.

use crate::domain::error::FundfolioError;
use crate::domain::user::User;

/// Remembers the last-logged-in user between runs. Lives outside the core:
/// losing or corrupting a session only means the user starts logged out.
pub trait SessionStore {
    fn save(&self, user: &User) -> Result<(), FundfolioError>;

    /// The restored session, or `None` when there is none, including when
    /// the persisted content is malformed, which is discarded silently.
    fn load(&self) -> Option<User>;

    fn clear(&self) -> Result<(), FundfolioError>;
}
