//! # Blogicum Infrastructure
//!
//! Concrete implementations of the repository ports defined in `blogicum-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL persistence via SeaORM

pub mod database;

pub use database::{DatabaseConfig, DatabaseConnections, InMemoryStore};
