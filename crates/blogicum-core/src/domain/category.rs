use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{MAX_SLUG_LENGTH, MAX_TITLE_LENGTH, Validate, ValidationErrors};

/// Category entity - a thematic section of the blog addressed by its slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// URL identifier; unique across all categories.
    pub slug: String,
    /// Uncheck to hide the category and everything in it.
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a published category.
    pub fn new(title: String, description: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            slug,
            is_published: true,
            created_at: Utc::now(),
        }
    }
}

impl Validate for Category {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("title", &self.title);
        errors.max_length("title", &self.title, MAX_TITLE_LENGTH);
        errors.required("description", &self.description);
        errors.required("slug", &self.slug);
        errors.max_length("slug", &self.slug, MAX_SLUG_LENGTH);
        errors.slug("slug", &self.slug);
        errors.into_result()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_is_published() {
        let category = Category::new("Travel".into(), "Trips".into(), "travel".into());
        assert!(category.is_published);
        assert_eq!(category.to_string(), "Travel");
        assert!(category.validate().is_ok());
    }

    #[test]
    fn invalid_slug_is_rejected() {
        let category = Category::new("Travel".into(), "Trips".into(), "my travel".into());
        let errors = category.validate().unwrap_err();
        assert!(errors.has("slug"));
        assert!(!errors.has("title"));
    }

    #[test]
    fn slug_longer_than_limit_is_rejected() {
        let category = Category::new("Travel".into(), "Trips".into(), "a".repeat(51));
        assert!(category.validate().unwrap_err().has("slug"));
    }
}
