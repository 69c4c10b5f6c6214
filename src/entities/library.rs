//! Library entity

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Library {
    pub library_id: i64,
    pub title: String,
    pub address: String,
    // free text, expected as "HH:MM - HH:MM"
    pub working_hours: String,
    pub owner_id: Option<i64>,
}
