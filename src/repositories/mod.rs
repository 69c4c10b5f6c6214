//! Repositories module - the entity store
//!
//! One repository per entity, all sharing the same `SqlitePool`. Repositories take
//! and return plain records (`entities`, `dtos`) and never carry HTTP concerns.
//!
//! Every write goes through [`validation::validate_record`], which checks the
//! entity's field table (`entities::schema`) and that referenced rows exist.
//! Cascading deletes and nullified references are enforced by the foreign keys
//! declared in `migrations/`, so a single `DELETE` removes the whole dependent tree
//! atomically.
//!
//! Queries are built at run time with `sqlx::query_as::<_, T>` over `FromRow`
//! entities, so the crate compiles without a live database.

pub mod author;
pub mod book;
pub mod comment;
pub mod error;
pub mod genre;
pub mod library;
pub mod traits;
pub mod user;
pub mod validation;

pub use traits::{Create, Delete, Read, ReadAll, Update};

pub use author::AuthorRepository;
pub use book::BookRepository;
pub use comment::CommentRepository;
pub use error::StoreError;
pub use genre::GenreRepository;
pub use library::LibraryRepository;
pub use user::UserRepository;

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::SqlitePool;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    /// In-memory database with the catalog schema applied.
    ///
    /// A single connection that never expires, otherwise every new connection
    /// would see its own empty in-memory database.
    pub async fn test_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("valid sqlite url")
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("in-memory pool");
        crate::core::db::MIGRATOR
            .run(&pool)
            .await
            .expect("migrations apply");
        pool
    }

    pub async fn seed_users(pool: &SqlitePool) {
        sqlx::query("INSERT INTO users (username, password) VALUES ('alice', ''), ('bob', '')")
            .execute(pool)
            .await
            .expect("users inserted");
    }
}
