//! Genre entity

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Genre {
    pub genre_id: i64,
    pub title: String,
    pub owner_id: Option<i64>,
}
