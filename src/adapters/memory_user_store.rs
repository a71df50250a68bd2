//! In-memory user store adapter.
//!
//! One instance per process, single-threaded by design: mutation is
//! last-writer-wins over a plain record list, which is acceptable because the
//! system is single-user and synchronous.

use std::cell::RefCell;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::error::FundfolioError;
use crate::domain::user::User;
use crate::ports::user_store::UserStore;

pub const DEMO_USER_ID: &str = "1";
pub const DEMO_EMAIL: &str = "john@example.com";
pub const DEMO_PASSWORD: &str = "password";

pub struct MemoryUserStore {
    users: RefCell<Vec<User>>,
    reset_delay: Duration,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        MemoryUserStore {
            users: RefCell::new(Vec::new()),
            reset_delay: Duration::from_secs(1),
        }
    }

    /// Override the simulated reset-link send delay. Tests pass
    /// `Duration::ZERO`.
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// A store pre-seeded with the demo account. The birth date is pinned
    /// relative to `now` so the demo user always lands in the 30-35 bracket.
    pub fn with_demo_user(now: DateTime<Utc>) -> Self {
        let store = Self::new();
        store.users.borrow_mut().push(User {
            id: DEMO_USER_ID.to_string(),
            name: "John Doe".to_string(),
            email: DEMO_EMAIL.to_string(),
            date_of_birth: now.date_naive() - chrono::Duration::days(32 * 365),
            password: DEMO_PASSWORD.to_string(),
        });
        store
    }

    pub fn user_count(&self) -> usize {
        self.users.borrow().len()
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MemoryUserStore {
    fn create(&self, user: User) -> Result<User, FundfolioError> {
        let mut users = self.users.borrow_mut();
        if users.iter().any(|u| u.email == user.email) {
            return Err(FundfolioError::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(user)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User, FundfolioError> {
        self.users
            .borrow()
            .iter()
            .find(|u| u.email == email && u.password == password)
            .cloned()
            .ok_or(FundfolioError::InvalidCredentials)
    }

    fn get(&self, id: &str) -> Option<User> {
        self.users.borrow().iter().find(|u| u.id == id).cloned()
    }

    fn update(&self, user: User) -> Result<User, FundfolioError> {
        let mut users = self.users.borrow_mut();
        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(FundfolioError::UserNotFound)?;

        // The stored email always wins.
        let updated = User {
            email: existing.email.clone(),
            ..user
        };
        *existing = updated.clone();
        Ok(updated)
    }

    fn reset_password(&self, email: &str) -> Result<(), FundfolioError> {
        if !self.users.borrow().iter().any(|u| u.email == email) {
            return Err(FundfolioError::UnknownEmail);
        }
        // Stand-in for sending a reset email.
        if !self.reset_delay.is_zero() {
            thread::sleep(self.reset_delay);
        }
        Ok(())
    }
}
