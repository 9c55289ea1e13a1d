//! Presentation metadata consumed by the admin console.

use serde::Serialize;

use super::{Category, Comment, Location, Post, User};

const PUBLISHED_HELP: &str = "Uncheck to hide the publication.";

/// Label and help text of one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldMeta {
    pub name: &'static str,
    pub verbose_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
}

impl FieldMeta {
    const fn new(name: &'static str, verbose_name: &'static str) -> Self {
        Self {
            name,
            verbose_name,
            help_text: None,
        }
    }

    const fn help(mut self, help_text: &'static str) -> Self {
        self.help_text = Some(help_text);
        self
    }
}

/// Labels, form fields and list-view columns of an entity.
pub trait AdminMeta {
    /// Stable machine name, used in error messages and routes.
    const ENTITY: &'static str;
    const VERBOSE_NAME: &'static str;
    const VERBOSE_NAME_PLURAL: &'static str;
    /// Columns shown in the admin list view, in order.
    const LIST_DISPLAY: &'static [&'static str];
    /// Form fields, in form order.
    const FIELDS: &'static [FieldMeta];

    fn meta() -> ModelMeta {
        ModelMeta {
            entity: Self::ENTITY,
            verbose_name: Self::VERBOSE_NAME,
            verbose_name_plural: Self::VERBOSE_NAME_PLURAL,
            list_display: Self::LIST_DISPLAY,
            fields: Self::FIELDS,
        }
    }

    /// Metadata of the field called `name`.
    fn field(name: &str) -> Option<&'static FieldMeta> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }
}

/// Serializable snapshot of [`AdminMeta`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelMeta {
    pub entity: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: &'static [&'static str],
    pub fields: &'static [FieldMeta],
}

impl AdminMeta for User {
    const ENTITY: &'static str = "user";
    const VERBOSE_NAME: &'static str = "user";
    const VERBOSE_NAME_PLURAL: &'static str = "Users";
    const LIST_DISPLAY: &'static [&'static str] = &["username", "email", "created_at"];
    const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::new("username", "Username"),
        FieldMeta::new("email", "Email address"),
    ];
}

impl AdminMeta for Category {
    const ENTITY: &'static str = "category";
    const VERBOSE_NAME: &'static str = "category";
    const VERBOSE_NAME_PLURAL: &'static str = "Categories";
    const LIST_DISPLAY: &'static [&'static str] = &["title", "slug", "is_published", "created_at"];
    const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::new("title", "Title"),
        FieldMeta::new("description", "Description"),
        FieldMeta::new("slug", "Identifier").help(
            "Page identifier for the URL; Latin letters, digits, hyphen and underscore are allowed.",
        ),
        FieldMeta::new("is_published", "Published").help(PUBLISHED_HELP),
        FieldMeta::new("created_at", "Added"),
    ];
}

impl AdminMeta for Location {
    const ENTITY: &'static str = "location";
    const VERBOSE_NAME: &'static str = "location";
    const VERBOSE_NAME_PLURAL: &'static str = "Locations";
    const LIST_DISPLAY: &'static [&'static str] = &["name", "is_published", "created_at"];
    const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::new("name", "Place name"),
        FieldMeta::new("is_published", "Published").help(PUBLISHED_HELP),
        FieldMeta::new("created_at", "Added"),
    ];
}

impl AdminMeta for Post {
    const ENTITY: &'static str = "post";
    const VERBOSE_NAME: &'static str = "post";
    const VERBOSE_NAME_PLURAL: &'static str = "Posts";
    const LIST_DISPLAY: &'static [&'static str] = &[
        "title",
        "short_text",
        "pub_date",
        "author",
        "category",
        "location",
        "is_published",
    ];
    const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::new("title", "Title"),
        FieldMeta::new("text", "Text"),
        FieldMeta::new("pub_date", "Publication date and time").help(
            "Setting a date and time in the future lets you schedule deferred publications.",
        ),
        FieldMeta::new("author", "Post author"),
        FieldMeta::new("location", "Location"),
        FieldMeta::new("category", "Category"),
        FieldMeta::new("is_published", "Published").help(PUBLISHED_HELP),
        FieldMeta::new("created_at", "Added"),
        FieldMeta::new("image", "Image"),
    ];
}

impl AdminMeta for Comment {
    const ENTITY: &'static str = "comment";
    const VERBOSE_NAME: &'static str = "comment";
    const VERBOSE_NAME_PLURAL: &'static str = "Comments";
    const LIST_DISPLAY: &'static [&'static str] = &["text", "author", "post", "created_at"];
    const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::new("text", "Comment text"),
        FieldMeta::new("author", "Comment author"),
        FieldMeta::new("post", "Post"),
        FieldMeta::new("created_at", "Added"),
    ];
}

/// Metadata of every registered entity, in admin menu order.
pub fn registry() -> Vec<ModelMeta> {
    vec![
        Category::meta(),
        Location::meta(),
        Post::meta(),
        Comment::meta(),
        User::meta(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_list_shows_preview_not_full_text() {
        let meta = Post::meta();
        assert!(meta.list_display.contains(&"short_text"));
        assert!(!meta.list_display.contains(&"text"));
    }

    #[test]
    fn help_texts_explain_slug_and_deferred_publication() {
        let slug = Category::field("slug").and_then(|f| f.help_text).unwrap();
        assert!(slug.contains("hyphen and underscore"));

        let pub_date = Post::field("pub_date").and_then(|f| f.help_text).unwrap();
        assert!(pub_date.contains("future"));

        for published in [
            Category::field("is_published"),
            Location::field("is_published"),
            Post::field("is_published"),
        ] {
            assert_eq!(published.unwrap().help_text, Some(PUBLISHED_HELP));
        }
    }

    #[test]
    fn every_field_has_a_label() {
        for meta in registry() {
            assert!(!meta.fields.is_empty(), "{}", meta.entity);
            assert!(meta.fields.iter().all(|f| !f.verbose_name.is_empty()));
        }
    }

    #[test]
    fn registry_serializes() {
        let json = serde_json::to_value(registry()).unwrap();
        assert_eq!(json[0]["verbose_name_plural"], "Categories");
        assert_eq!(json.as_array().unwrap().len(), 5);
        assert_eq!(json[0]["fields"][0]["verbose_name"], "Title");
        assert!(json[0]["fields"][0].get("help_text").is_none());
    }
}
