//! Field-level validation shared by every entity.
//!
//! Limits are counted in characters, not bytes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Maximum length of short string columns (titles, names).
pub const MAX_TITLE_LENGTH: usize = 256;

/// Maximum length of a category slug.
pub const MAX_SLUG_LENGTH: usize = 50;

/// Maximum length of a comment.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// Maximum length of a stored image path.
pub const MAX_IMAGE_PATH_LENGTH: usize = 100;

static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is valid")
});

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors collected while validating one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether the given field was rejected.
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Require a non-blank value.
    pub fn required(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "this field is required");
        }
    }

    /// Reject values longer than `max` characters.
    pub fn max_length(&mut self, field: &'static str, value: &str, max: usize) {
        let len = value.chars().count();
        if len > max {
            self.add(
                field,
                format!("ensure this value has at most {max} characters (it has {len})"),
            );
        }
    }

    /// Slug rules: latin letters, digits, hyphen and underscore.
    pub fn slug(&mut self, field: &'static str, value: &str) {
        if !value.is_empty() && !SLUG_PATTERN.is_match(value) {
            self.add(
                field,
                "enter a valid slug consisting of letters, numbers, underscores or hyphens",
            );
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Entities that can check their own field constraints.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}
