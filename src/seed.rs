//! Demo data for a fresh database
//!
//! Fills every table through the repositories, so seeded rows pass the same
//! validation as rows created over HTTP.

use crate::core::AppState;
use crate::dtos::{
    CreateAuthorDTO, CreateBookDTO, CreateCommentDTO, CreateGenreDTO, CreateLibraryDTO,
    CreateUserDTO,
};
use crate::entities::{Book, Genre, User};
use crate::repositories::{Create, StoreError};
use chrono::{SubsecRound, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

pub const USERS: usize = 100;
pub const LIBRARIES: usize = 5;
pub const COMMENTS_PER_BOOK: usize = 5;
pub const GENRES: [&str; 6] = [
    "Детектив",
    "Приключение",
    "Роман",
    "Фентези",
    "Научная фантастика",
    "Справочник",
];

/// Authors are assumed to write their book at this age
const AUTHOR_AGE: i64 = 35;

const AUTHORS_BOOKS: &str = include_str!("../data/authors_books.json");

#[derive(Deserialize)]
struct BookEntry {
    title: String,
    author: String,
    year: i64,
}

/// Rows inserted by [`fill`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub libraries: usize,
    pub genres: usize,
    pub authors: usize,
    pub books: usize,
    pub comments: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid bundled book list: {0}")]
    Data(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Seeds the store. A fixed `rng_seed` makes the owner/genre choices reproducible.
#[instrument(skip(state))]
pub async fn fill(state: &AppState, rng_seed: Option<u64>) -> Result<SeedReport, SeedError> {
    let entries: Vec<BookEntry> = serde_json::from_str(AUTHORS_BOOKS)?;
    let mut rng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut report = SeedReport::default();

    let users = fill_users(state).await?;
    report.users = users.len();

    for i in 0..LIBRARIES {
        state
            .library
            .create(&CreateLibraryDTO {
                title: format!("Районная библиотека №{}", i + 1),
                address: format!("г. Рыбинск, улица {}, дом {}", Uuid::new_v4(), i),
                working_hours: "09:00 - 17:00".to_string(),
                owner_id: None,
            })
            .await?;
        report.libraries += 1;
    }

    let mut genres: Vec<Genre> = Vec::with_capacity(GENRES.len());
    for title in GENRES {
        let genre = state
            .genre
            .create(&CreateGenreDTO {
                title: title.to_string(),
                owner_id: None,
            })
            .await?;
        genres.push(genre);
    }
    report.genres = genres.len();

    let mut books: Vec<Book> = Vec::with_capacity(entries.len());
    for entry in entries {
        let author = state
            .author
            .create(&CreateAuthorDTO {
                full_name: entry.author,
                birthday: entry.year - AUTHOR_AGE,
                owner_id: None,
            })
            .await?;
        report.authors += 1;

        let book = state
            .book
            .create(&CreateBookDTO {
                title: entry.title,
                year: Some(entry.year),
                author_id: author.author_id,
                genre_id: genres.choose(&mut rng).map(|genre| genre.genre_id),
                owner_id: users.choose(&mut rng).map(|user| user.user_id),
            })
            .await?;
        books.push(book);
    }
    report.books = books.len();

    for book in &books {
        for _ in 0..COMMENTS_PER_BOOK {
            state
                .comment
                .create(&CreateCommentDTO {
                    book_id: book.book_id,
                    owner_id: users.choose(&mut rng).map(|user| user.user_id),
                    text: format!("Содержательный комментарий о книге {}", book.title),
                    created_at: Utc::now().trunc_subsecs(6),
                })
                .await?;
            report.comments += 1;
        }
    }

    info!(?report, "Database seeded");
    Ok(report)
}

/// Seeded users get a password that matches no bcrypt hash, so they cannot log in
async fn fill_users(state: &AppState) -> Result<Vec<User>, StoreError> {
    let mut users = Vec::with_capacity(USERS);
    for i in 0..USERS {
        let user = state
            .user
            .create(&CreateUserDTO {
                username: format!("user_{i}"),
                password: format!("!{}", Uuid::new_v4()),
            })
            .await?;
        users.push(user);
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::testing::test_pool;
    use crate::repositories::{Read, ReadAll};

    #[tokio::test]
    async fn test_fill_populates_every_table() {
        let state = AppState::new(test_pool().await, "secret".to_string());

        let report = fill(&state, Some(7)).await.unwrap();

        assert_eq!(report.users, USERS);
        assert_eq!(report.libraries, LIBRARIES);
        assert_eq!(report.genres, GENRES.len());
        assert_eq!(report.authors, report.books);
        assert_eq!(report.comments, report.books * COMMENTS_PER_BOOK);

        let books = state.book.read_all().await.unwrap();
        assert_eq!(books.len(), report.books);
        for book in &books {
            assert!(book.owner_id.is_some());
            assert!(book.genre_id.is_some());
            let author = state.author.read(&book.author_id).await.unwrap().unwrap();
            assert_eq!(Some(author.birthday + AUTHOR_AGE), book.year);
            let comments = state.comment.find_many_by_book_id(&book.book_id).await.unwrap();
            assert_eq!(comments.len(), COMMENTS_PER_BOOK);
        }
    }

    #[tokio::test]
    async fn test_seeded_users_cannot_log_in() {
        let state = AppState::new(test_pool().await, "secret".to_string());
        fill(&state, Some(1)).await.unwrap();

        let user = state.user.find_by_username("user_0").await.unwrap().unwrap();
        assert!(!user.verify_password(""));
        assert!(!user.verify_password(&user.password));
    }
}
