use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{MAX_TITLE_LENGTH, Validate, ValidationErrors};

/// User entity - the identity that owns posts and comments.
///
/// Credentials and sessions belong to the external user-management
/// subsystem; only what foreign keys need is kept here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamp.
    pub fn new(username: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            created_at: Utc::now(),
        }
    }
}

impl Validate for User {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("username", &self.username);
        errors.max_length("username", &self.username, MAX_TITLE_LENGTH);
        errors.max_length("email", &self.email, MAX_TITLE_LENGTH);
        errors.into_result()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}
