//! In-memory store - used as fallback when no database is configured.
//!
//! Enforces the same uniqueness rules, foreign keys and delete policies as
//! the PostgreSQL schema. All tables live behind one async `RwLock`, so every
//! operation (including its cascade) is atomic.
//! Note: Data is lost on process restart.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use blogicum_core::Validate;
use blogicum_core::domain::{Category, Comment, Location, Post, User};
use blogicum_core::error::RepoError;
use blogicum_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostRepository,
    UserRepository,
};

#[derive(Default)]
pub struct Tables {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    locations: HashMap<Uuid, Location>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
}

impl Tables {
    fn delete_post(&mut self, post_id: Uuid) {
        self.posts.remove(&post_id);
        self.comments.retain(|_, c| c.post_id != post_id);
    }
}

/// A row type stored in [`Tables`].
pub trait Table: Clone + Validate + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    fn rows(tables: &Tables) -> &HashMap<Uuid, Self>;

    fn rows_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self>;

    /// Unique and foreign-key checks against the current tables.
    fn check_constraints(&self, _tables: &Tables) -> Result<(), RepoError> {
        Ok(())
    }

    /// Copy columns that never change on edit from the stored row.
    fn keep_immutable(&mut self, stored: &Self);

    /// Sort rows into the entity's default order.
    fn sort(rows: &mut [Self]);

    /// Apply the delete policy of every reference to the removed row.
    fn on_delete(_id: Uuid, _tables: &mut Tables) {}
}

fn require<T: Table>(tables: &Tables, id: Uuid, field: &str) -> Result<(), RepoError> {
    if T::rows(tables).contains_key(&id) {
        Ok(())
    } else {
        Err(RepoError::Constraint(format!(
            "{field} references missing row {id}"
        )))
    }
}

impl Table for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn rows(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.users
    }

    fn rows_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.users
    }

    fn check_constraints(&self, tables: &Tables) -> Result<(), RepoError> {
        let taken = tables
            .users
            .values()
            .any(|u| u.id != self.id && u.username == self.username);
        if taken {
            return Err(RepoError::Duplicate("username".to_string()));
        }
        Ok(())
    }

    fn keep_immutable(&mut self, stored: &Self) {
        self.created_at = stored.created_at;
    }

    fn sort(rows: &mut [Self]) {
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    }

    fn on_delete(id: Uuid, tables: &mut Tables) {
        let authored: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in authored {
            tables.delete_post(post_id);
        }
        tables.comments.retain(|_, c| c.author_id != id);
    }
}

impl Table for Category {
    fn id(&self) -> Uuid {
        self.id
    }

    fn rows(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.categories
    }

    fn rows_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.categories
    }

    fn check_constraints(&self, tables: &Tables) -> Result<(), RepoError> {
        let taken = tables
            .categories
            .values()
            .any(|c| c.id != self.id && c.slug == self.slug);
        if taken {
            return Err(RepoError::Duplicate("slug".to_string()));
        }
        Ok(())
    }

    fn keep_immutable(&mut self, stored: &Self) {
        self.created_at = stored.created_at;
    }

    fn sort(rows: &mut [Self]) {
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    }

    fn on_delete(id: Uuid, tables: &mut Tables) {
        for post in tables.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
    }
}

impl Table for Location {
    fn id(&self) -> Uuid {
        self.id
    }

    fn rows(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.locations
    }

    fn rows_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.locations
    }

    fn keep_immutable(&mut self, stored: &Self) {
        self.created_at = stored.created_at;
    }

    fn sort(rows: &mut [Self]) {
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    }

    fn on_delete(id: Uuid, tables: &mut Tables) {
        for post in tables.posts.values_mut() {
            if post.location_id == Some(id) {
                post.location_id = None;
            }
        }
    }
}

impl Table for Post {
    fn id(&self) -> Uuid {
        self.id
    }

    fn rows(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.posts
    }

    fn rows_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.posts
    }

    fn check_constraints(&self, tables: &Tables) -> Result<(), RepoError> {
        require::<User>(tables, self.author_id, "author")?;
        if let Some(location_id) = self.location_id {
            require::<Location>(tables, location_id, "location")?;
        }
        if let Some(category_id) = self.category_id {
            require::<Category>(tables, category_id, "category")?;
        }
        Ok(())
    }

    fn keep_immutable(&mut self, stored: &Self) {
        self.created_at = stored.created_at;
    }

    fn sort(rows: &mut [Self]) {
        rows.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(a.id.cmp(&b.id)));
    }

    fn on_delete(id: Uuid, tables: &mut Tables) {
        tables.comments.retain(|_, c| c.post_id != id);
    }
}

impl Table for Comment {
    fn id(&self) -> Uuid {
        self.id
    }

    fn rows(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.comments
    }

    fn rows_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.comments
    }

    fn check_constraints(&self, tables: &Tables) -> Result<(), RepoError> {
        require::<User>(tables, self.author_id, "author")?;
        require::<Post>(tables, self.post_id, "post")
    }

    fn keep_immutable(&mut self, stored: &Self) {
        self.created_at = stored.created_at;
    }

    fn sort(rows: &mut [Self]) {
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    }
}

/// Shared in-memory tables handing out one repository per entity.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryRepository<User> {
        InMemoryRepository::new(self.tables.clone())
    }

    pub fn categories(&self) -> InMemoryRepository<Category> {
        InMemoryRepository::new(self.tables.clone())
    }

    pub fn locations(&self) -> InMemoryRepository<Location> {
        InMemoryRepository::new(self.tables.clone())
    }

    pub fn posts(&self) -> InMemoryRepository<Post> {
        InMemoryRepository::new(self.tables.clone())
    }

    pub fn comments(&self) -> InMemoryRepository<Comment> {
        InMemoryRepository::new(self.tables.clone())
    }
}

/// Generic in-memory repository over one table of an [`InMemoryStore`].
pub struct InMemoryRepository<T> {
    tables: Arc<RwLock<Tables>>,
    _entity: PhantomData<T>,
}

impl<T: Table> InMemoryRepository<T> {
    fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self {
            tables,
            _entity: PhantomData,
        }
    }

    /// Rows matching `predicate`, in default order.
    async fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let tables = self.tables.read().await;
        let mut rows: Vec<T> = T::rows(&tables)
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect();
        T::sort(&mut rows);
        rows
    }
}

#[async_trait]
impl<T: Table> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let tables = self.tables.read().await;
        Ok(T::rows(&tables).get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.select(|_| true).await)
    }

    async fn create(&self, entity: T) -> Result<T, RepoError> {
        entity.validate()?;

        let mut tables = self.tables.write().await;
        if T::rows(&tables).contains_key(&entity.id()) {
            return Err(RepoError::Duplicate("id".to_string()));
        }
        entity.check_constraints(&tables)?;

        T::rows_mut(&mut tables).insert(entity.id(), entity.clone());
        tracing::debug!(id = %entity.id(), "Row inserted");
        Ok(entity)
    }

    async fn update(&self, mut entity: T) -> Result<T, RepoError> {
        entity.validate()?;

        let mut tables = self.tables.write().await;
        let stored = T::rows(&tables)
            .get(&entity.id())
            .ok_or(RepoError::NotFound)?;
        entity.keep_immutable(stored);
        entity.check_constraints(&tables)?;

        T::rows_mut(&mut tables).insert(entity.id(), entity.clone());
        tracing::debug!(id = %entity.id(), "Row updated");
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if T::rows_mut(&mut tables).remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        T::on_delete(id, &mut tables);

        tracing::debug!(%id, "Row deleted");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository<Category> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.slug == slug).cloned())
    }
}

impl LocationRepository for InMemoryRepository<Location> {}

#[async_trait]
impl PostRepository for InMemoryRepository<Post> {
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.select(|p| p.author_id == author_id).await)
    }

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.select(|p| p.category_id == Some(category_id)).await)
    }

    async fn list_visible(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| {
                let category = p.category_id.and_then(|id| tables.categories.get(&id));
                p.is_visible_at(now, category)
            })
            .cloned()
            .collect();
        Post::sort(&mut rows);
        Ok(rows)
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository<Comment> {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        Ok(self.select(|c| c.post_id == post_id).await)
    }
}
