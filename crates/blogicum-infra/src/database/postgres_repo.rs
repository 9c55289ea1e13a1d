//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

use blogicum_core::domain::{Category, Comment, Post, User};
use blogicum_core::error::RepoError;
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{OrderedEntity, PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

impl OrderedEntity for UserEntity {
    fn ordered() -> Select<Self> {
        Self::find().order_by_asc(user::Column::CreatedAt)
    }
}

impl OrderedEntity for CategoryEntity {
    fn ordered() -> Select<Self> {
        Self::find().order_by_asc(category::Column::CreatedAt)
    }
}

impl OrderedEntity for LocationEntity {
    fn ordered() -> Select<Self> {
        Self::find().order_by_asc(location::Column::CreatedAt)
    }
}

impl OrderedEntity for PostEntity {
    fn ordered() -> Select<Self> {
        Self::find().order_by_desc(post::Column::PubDate)
    }
}

impl OrderedEntity for CommentEntity {
    fn ordered() -> Select<Self> {
        Self::find().order_by_asc(comment::Column::CreatedAt)
    }
}

/// Published, non-deferred posts inside a published category.
pub(crate) fn visible_posts_query(now: DateTime<Utc>) -> Select<PostEntity> {
    PostEntity::ordered()
        .inner_join(CategoryEntity)
        .filter(post::Column::IsPublished.eq(true))
        .filter(post::Column::PubDate.lte(DateTimeWithTimeZone::from(now)))
        .filter(category::Column::IsPublished.eq(true))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        tracing::debug!(slug, "Finding category by slug");

        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

impl LocationRepository for PostgresLocationRepository {}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::ordered()
            .filter(post::Column::AuthorId.eq(author_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::ordered()
            .filter(post::Column::CategoryId.eq(category_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_visible(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(%now, "Listing visible posts");

        let result = visible_posts_query(now)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::ordered()
            .filter(comment::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
