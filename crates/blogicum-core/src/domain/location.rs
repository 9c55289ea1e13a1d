use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{MAX_TITLE_LENGTH, Validate, ValidationErrors};

/// Location entity - a named place a post can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            is_published: true,
            created_at: Utc::now(),
        }
    }
}

impl Validate for Location {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("name", &self.name);
        errors.max_length("name", &self.name, MAX_TITLE_LENGTH);
        errors.into_result()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
