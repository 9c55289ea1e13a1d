//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

/// Domain errors - business rule failures.
///
/// Invalid field values surface as [`ValidationErrors`] through
/// [`RepoError::Validation`].
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// A unique column already holds this value.
    #[error("Duplicate value for {0}")]
    Duplicate(String),

    /// A referenced row does not exist.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}
