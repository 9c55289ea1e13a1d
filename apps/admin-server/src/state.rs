//! Application state - shared across all handlers.

use std::sync::Arc;

use blogicum_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};
use blogicum_infra::database::{DatabaseConfig, DatabaseConnections, InMemoryStore};

#[cfg(feature = "postgres")]
use blogicum_infra::database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresLocationRepository,
    PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => Self::postgres(Arc::new(connections)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::in_memory()
        };

        tracing::info!(storage = state.storage(), "Application state initialized");
        state
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(store.users()),
            categories: Arc::new(store.categories()),
            locations: Arc::new(store.locations()),
            posts: Arc::new(store.posts()),
            comments: Arc::new(store.comments()),
            db: None,
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: Arc<DatabaseConnections>) -> Self {
        let conn = &connections.main;
        Self {
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(conn.clone())),
            locations: Arc::new(PostgresLocationRepository::new(conn.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(conn.clone())),
            db: Some(connections),
        }
    }

    /// Name of the active storage backend.
    pub fn storage(&self) -> &'static str {
        if self.db.is_some() { "postgres" } else { "memory" }
    }
}
