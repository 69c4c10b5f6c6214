//! Genre DTOs

use crate::entities::Genre;
use crate::entities::schema::{FieldRule, FieldValue, GENRE_RULES, Record};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenreDTO {
    pub id: i64,
    pub title: String,
}

impl From<Genre> for GenreDTO {
    fn from(value: Genre) -> Self {
        Self {
            id: value.genre_id,
            title: value.title,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateGenreDTO {
    pub title: String,
    pub owner_id: Option<i64>,
}

impl Record for CreateGenreDTO {
    const RULES: &'static [FieldRule] = GENRE_RULES;

    fn values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![("title", FieldValue::Text(&self.title))]
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateGenreDTO {
    pub title: Option<String>,
}

impl UpdateGenreDTO {
    pub fn apply_to(&self, current: &Genre) -> CreateGenreDTO {
        CreateGenreDTO {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            owner_id: current.owner_id,
        }
    }
}
