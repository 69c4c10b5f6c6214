//! Author entity

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Author {
    pub author_id: i64,
    pub full_name: String,
    /// Year of birth
    pub birthday: i64,
    pub owner_id: Option<i64>,
}
