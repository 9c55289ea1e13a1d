//! # Blogicum Core
//!
//! The domain layer of the Blogicum blog: categories, locations, posts and
//! comments, their field rules and the repository ports.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use validation::{Validate, ValidationErrors};
