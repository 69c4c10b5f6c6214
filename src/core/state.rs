//! Application State - shared by every route and middleware

use crate::repositories::{
    AuthorRepository, BookRepository, CommentRepository, GenreRepository, LibraryRepository,
    UserRepository,
};
use sqlx::SqlitePool;

pub struct AppState {
    pub user: UserRepository,

    /// Store-only, used by the seeding command
    pub library: LibraryRepository,

    pub genre: GenreRepository,

    pub author: AuthorRepository,

    pub book: BookRepository,

    pub comment: CommentRepository,

    /// Secret key for signing JWT tokens
    pub jwt_secret: String,
}

impl AppState {
    /// Builds every repository on the shared connection pool
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool with migrations applied
    /// * `jwt_secret` - Secret key for signing JWT tokens
    pub fn new(pool: SqlitePool, jwt_secret: String) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            library: LibraryRepository::new(pool.clone()),
            genre: GenreRepository::new(pool.clone()),
            author: AuthorRepository::new(pool.clone()),
            book: BookRepository::new(pool.clone()),
            comment: CommentRepository::new(pool),
            jwt_secret,
        }
    }
}
