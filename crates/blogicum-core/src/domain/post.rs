use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;
use crate::validation::{MAX_IMAGE_PATH_LENGTH, MAX_TITLE_LENGTH, Validate, ValidationErrors};

/// Number of characters kept by [`Post::short_text`].
pub const SHORT_TEXT_LENGTH: usize = 100;

/// Directory (relative to the media root) post images are uploaded to.
pub const IMAGE_UPLOAD_DIR: &str = "posts_images";

/// Post entity - a blog publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// A date in the future defers the publication.
    pub pub_date: DateTime<Utc>,
    /// Deleting the author deletes the post.
    pub author_id: Uuid,
    /// Nulled when the location is deleted.
    pub location_id: Option<Uuid>,
    /// Nulled when the category is deleted.
    pub category_id: Option<Uuid>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    /// Path of the attached image, relative to the media root.
    pub image: Option<String>,
}

impl Post {
    /// Create a published post without location, category or image.
    pub fn new(author_id: Uuid, title: String, text: String, pub_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            text,
            pub_date,
            author_id,
            location_id: None,
            category_id: None,
            is_published: true,
            created_at: Utc::now(),
            image: None,
        }
    }

    /// Preview of the text for list views.
    pub fn short_text(&self) -> &str {
        match self.text.char_indices().nth(SHORT_TEXT_LENGTH) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    /// Storage path for an uploaded image file name.
    pub fn image_path(file_name: &str) -> String {
        format!("{IMAGE_UPLOAD_DIR}/{file_name}")
    }

    /// Whether readers can see the post at `now`.
    ///
    /// `category` must be the post's own category, if it has one.
    pub fn is_visible_at(&self, now: DateTime<Utc>, category: Option<&Category>) -> bool {
        self.is_published
            && self.pub_date <= now
            && category.is_some_and(|c| Some(c.id) == self.category_id && c.is_published)
    }
}

impl Validate for Post {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("title", &self.title);
        errors.max_length("title", &self.title, MAX_TITLE_LENGTH);
        errors.required("text", &self.text);
        if let Some(image) = &self.image {
            errors.required("image", image);
            errors.max_length("image", image, MAX_IMAGE_PATH_LENGTH);
        }
        errors.into_result()
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn post_with_text(text: &str) -> Post {
        Post::new(Uuid::new_v4(), "Title".into(), text.into(), Utc::now())
    }

    #[test]
    fn short_text_truncates_long_text() {
        let text = "x".repeat(250);
        let post = post_with_text(&text);
        assert_eq!(post.short_text(), &text[..100]);
        assert_eq!(post.short_text().chars().count(), SHORT_TEXT_LENGTH);
    }

    #[test]
    fn short_text_returns_short_text_whole() {
        let post = post_with_text("A short note");
        assert_eq!(post.short_text(), "A short note");

        let exact = "y".repeat(SHORT_TEXT_LENGTH);
        assert_eq!(post_with_text(&exact).short_text(), exact);
    }

    #[test]
    fn short_text_respects_multibyte_characters() {
        let text = "Путешествие ".repeat(20);
        let post = post_with_text(&text);
        let expected: String = text.chars().take(SHORT_TEXT_LENGTH).collect();
        assert_eq!(post.short_text(), expected);
    }

    #[test]
    fn new_post_uses_defaults() {
        let post = post_with_text("Body");
        assert!(post.is_published);
        assert!(post.location_id.is_none());
        assert!(post.category_id.is_none());
        assert!(post.image.is_none());
    }

    #[test]
    fn image_path_is_under_upload_dir() {
        assert_eq!(Post::image_path("sea.jpg"), "posts_images/sea.jpg");
    }

    #[test]
    fn overlong_image_path_is_rejected() {
        let mut post = post_with_text("Body");
        post.image = Some(Post::image_path(&"a".repeat(100)));
        assert!(post.validate().unwrap_err().has("image"));
    }

    #[test]
    fn visibility_requires_published_past_post_in_published_category() {
        let now = Utc::now();
        let category = Category::new("News".into(), "All news".into(), "news".into());
        let mut post = post_with_text("Body");
        post.category_id = Some(category.id);
        post.pub_date = now - Duration::hours(1);
        assert!(post.is_visible_at(now, Some(&category)));

        let mut deferred = post.clone();
        deferred.pub_date = now + Duration::days(1);
        assert!(!deferred.is_visible_at(now, Some(&category)));

        let mut hidden = post.clone();
        hidden.is_published = false;
        assert!(!hidden.is_visible_at(now, Some(&category)));

        let mut hidden_category = category.clone();
        hidden_category.is_published = false;
        assert!(!post.is_visible_at(now, Some(&hidden_category)));

        post.category_id = None;
        assert!(!post.is_visible_at(now, None));
    }
}
