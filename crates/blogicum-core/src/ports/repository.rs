use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Comment, Location, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// Writes validate the entity first and fail with [`RepoError::Validation`].
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities in the entity's default order.
    async fn list(&self) -> Result<Vec<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite the editable fields of an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, applying the delete policy of every
    /// reference to it.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository. Deleting a user removes their posts and comments.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Category repository. Deleting a category detaches its posts.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;
}

/// Location repository. Deleting a location detaches its posts.
pub trait LocationRepository: BaseRepository<Location, Uuid> {}

/// Post repository. Every listing is ordered newest `pub_date` first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Posts readers can see at `now`: published, not deferred, and filed
    /// under a published category.
    async fn list_visible(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository. Every listing is chronological.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}
