//! JSON file session persistence.
//!
//! The last-logged-in user is serialized to a small JSON file and restored on
//! the next run. Corrupt or unreadable content is discarded silently: the
//! user just starts logged out.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::error::FundfolioError;
use crate::domain::user::User;
use crate::ports::session_store::SessionStore;

pub struct JsonSessionAdapter {
    path: PathBuf,
}

impl JsonSessionAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for JsonSessionAdapter {
    fn save(&self, user: &User) -> Result<(), FundfolioError> {
        let json = serde_json::to_string(user).map_err(|e| FundfolioError::Data {
            reason: format!("failed to serialize session: {e}"),
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Option<User> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn clear(&self) -> Result<(), FundfolioError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
