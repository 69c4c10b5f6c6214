//! Author DTOs

use crate::entities::Author;
use crate::entities::schema::{AUTHOR_RULES, FieldRule, FieldValue, Record};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthorDTO {
    pub id: i64,
    pub full_name: String,
    pub birthday: i64,
}

impl From<Author> for AuthorDTO {
    fn from(value: Author) -> Self {
        Self {
            id: value.author_id,
            full_name: value.full_name,
            birthday: value.birthday,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAuthorDTO {
    pub full_name: String,
    pub birthday: i64,
    pub owner_id: Option<i64>,
}

impl Record for CreateAuthorDTO {
    const RULES: &'static [FieldRule] = AUTHOR_RULES;

    fn values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("full_name", FieldValue::Text(&self.full_name)),
            ("birthday", FieldValue::Integer(self.birthday)),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAuthorDTO {
    pub full_name: Option<String>,
    pub birthday: Option<i64>,
}

impl UpdateAuthorDTO {
    pub fn apply_to(&self, current: &Author) -> CreateAuthorDTO {
        CreateAuthorDTO {
            full_name: self
                .full_name
                .clone()
                .unwrap_or_else(|| current.full_name.clone()),
            birthday: self.birthday.unwrap_or(current.birthday),
            owner_id: current.owner_id,
        }
    }
}
