//! User accounts.
//!
//! Passwords are stored and compared as plain text: this is a single-user,
//! in-memory calculator with no authentication security model.

use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub password: String,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        date_of_birth: NaiveDate,
        password: impl Into<String>,
    ) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            date_of_birth,
            password: password.into(),
        }
    }
}
