//! Ports - trait definitions for persistence.
//! Infrastructure provides the implementations.

mod repository;

pub use repository::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostRepository,
    UserRepository,
};
