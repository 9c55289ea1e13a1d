//! Data Transfer Objects - admin forms and list rows.
//!
//! One form per entity serves both create and edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn published_by_default() -> bool {
    true
}

/// Create/edit form for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserForm {
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Create/edit form for a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryForm {
    pub title: String,
    pub description: String,
    pub slug: String,
    #[serde(default = "published_by_default")]
    pub is_published: bool,
}

/// Create/edit form for a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationForm {
    pub name: String,
    #[serde(default = "published_by_default")]
    pub is_published: bool,
}

/// Create/edit form for a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    #[serde(default)]
    pub location_id: Option<Uuid>,
    /// Required by the admin form; a missing value is a field error.
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default = "published_by_default")]
    pub is_published: bool,
    /// File name inside the post image directory.
    #[serde(default)]
    pub image: Option<String>,
}

/// Create/edit form for a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    pub text: String,
    pub author_id: Uuid,
    pub post_id: Uuid,
}

/// Row of the admin post list: the full text is replaced by its preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub short_text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub is_published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_flags_default_to_published() {
        let form: LocationForm = serde_json::from_str(r#"{"name": "Sochi"}"#).unwrap();
        assert!(form.is_published);

        let form: CategoryForm = serde_json::from_str(
            r#"{"title": "T", "description": "D", "slug": "t", "is_published": false}"#,
        )
        .unwrap();
        assert!(!form.is_published);
    }

    #[test]
    fn post_form_optional_references_default_to_none() {
        let form: PostForm = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "text": "World",
            "pub_date": "2024-05-01T12:00:00Z",
            "author_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
        }))
        .unwrap();

        assert!(form.location_id.is_none());
        assert!(form.category_id.is_none());
        assert!(form.image.is_none());
        assert!(form.is_published);
    }
}
