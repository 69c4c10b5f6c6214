//! Comment entity - a principal's note attached to a book

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: i64,
    pub book_id: i64,
    pub owner_id: Option<i64>,
    pub text: String,
    // set on insert, never written again
    pub created_at: DateTime<Utc>,
}
