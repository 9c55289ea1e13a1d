//! Domain entities - the blog's tables as plain structs.

mod category;
mod comment;
mod location;
pub mod meta;
mod post;
mod user;

pub use category::Category;
pub use comment::Comment;
pub use location::Location;
pub use meta::{AdminMeta, FieldMeta, ModelMeta};
pub use post::{IMAGE_UPLOAD_DIR, Post, SHORT_TEXT_LENGTH};
pub use user::User;
