//! # Blogicum Shared
//!
//! Types exchanged with the admin console: forms, list-view rows and the
//! response envelope.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse, FieldViolation};
