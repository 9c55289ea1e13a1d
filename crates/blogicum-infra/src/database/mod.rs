//! Database connection management and repository adapters.

mod connections;
pub mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use memory::{InMemoryRepository, InMemoryStore};

#[cfg(feature = "postgres")]
pub use postgres_base::{OrderedEntity, PostgresBaseRepository};
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresLocationRepository,
    PostgresPostRepository, PostgresUserRepository,
};
