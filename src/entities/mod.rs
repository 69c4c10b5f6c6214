//! Entities module - domain records persisted in the catalog database
//!
//! Every entity maps one-to-one onto a table created by `migrations/0001_catalog.sql`.
//! Entities are plain data: queries live in `repositories`, wire shapes in `dtos`.

pub mod author;
pub mod book;
pub mod comment;
pub mod genre;
pub mod library;
pub mod schema;
pub mod user;

// Re-exports
pub use author::Author;
pub use book::Book;
pub use comment::Comment;
pub use genre::Genre;
pub use library::Library;
pub use user::User;
