use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{MAX_COMMENT_LENGTH, Validate, ValidationErrors};

/// Comment entity - a reader's reply under a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    /// Deleting the author deletes the comment.
    pub author_id: Uuid,
    /// Deleting the post deletes the comment.
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            author_id,
            post_id,
            created_at: Utc::now(),
        }
    }
}

impl Validate for Comment {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("text", &self.text);
        errors.max_length("text", &self.text, MAX_COMMENT_LENGTH);
        errors.into_result()
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_text_is_bounded() {
        let ok = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "x".repeat(500));
        assert!(ok.validate().is_ok());

        let too_long = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "x".repeat(501));
        assert!(too_long.validate().unwrap_err().has("text"));
    }

    #[test]
    fn empty_comment_is_rejected() {
        let empty = Comment::new(Uuid::new_v4(), Uuid::new_v4(), String::new());
        assert!(empty.validate().unwrap_err().has("text"));
    }
}
