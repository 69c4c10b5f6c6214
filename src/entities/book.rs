//! Book entity

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Book {
    pub book_id: i64,
    pub title: String,
    pub year: Option<i64>,
    // removed together with the author
    pub author_id: i64,
    // cleared when the genre is removed
    pub genre_id: Option<i64>,
    pub owner_id: Option<i64>,
}
