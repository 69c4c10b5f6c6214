//! Book DTOs

use super::double_option;
use crate::entities::Book;
use crate::entities::schema::{self, BOOK_RULES, FieldRule, FieldValue, Record};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// Book as exposed to the client. The key is not part of the wire shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BookDTO {
    pub title: String,
    pub year: Option<i64>,
    pub author: i64,
    pub genre: Option<i64>,
    pub owner: Option<i64>,
}

impl From<Book> for BookDTO {
    fn from(value: Book) -> Self {
        Self {
            title: value.title,
            year: value.year,
            author: value.author_id,
            genre: value.genre_id,
            owner: value.owner_id,
        }
    }
}

/// Body of `POST /books/` and `PUT /books/{id}/`.
///
/// Every field is optional at the wire level so that a missing required field is
/// reported per field instead of failing deserialization. Any `owner` sent by the
/// client is ignored: the owner always comes from the authenticated principal.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BookRequestDTO {
    pub title: Option<String>,
    pub year: Option<i64>,
    pub author: Option<i64>,
    pub genre: Option<i64>,
}

impl Record for BookRequestDTO {
    const RULES: &'static [FieldRule] = BOOK_RULES;

    fn values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("title", self.title.as_deref().map_or(FieldValue::Missing, FieldValue::Text)),
            ("year", self.year.into()),
            ("author", self.author.map_or(FieldValue::Missing, FieldValue::Reference)),
            ("genre", self.genre.map_or(FieldValue::Null, FieldValue::Reference)),
        ]
    }
}

impl BookRequestDTO {
    fn required(self) -> Result<(String, i64, Option<i64>, Option<i64>), ValidationErrors> {
        let errors = schema::missing(&self);
        match (self.title, self.author) {
            (Some(title), Some(author)) => Ok((title, author, self.year, self.genre)),
            _ => Err(errors),
        }
    }

    pub fn into_create(self, owner_id: i64) -> Result<CreateBookDTO, ValidationErrors> {
        let (title, author_id, year, genre_id) = self.required()?;
        Ok(CreateBookDTO {
            title,
            year,
            author_id,
            genre_id,
            owner_id: Some(owner_id),
        })
    }

    /// Full replacement: omitted nullable fields are reset to null.
    pub fn into_update(self) -> Result<UpdateBookDTO, ValidationErrors> {
        let (title, author, year, genre) = self.required()?;
        Ok(UpdateBookDTO {
            title: Some(title),
            year: Some(year),
            author: Some(author),
            genre: Some(genre),
        })
    }
}

/// DTO for inserting a book (without book_id, assigned by the database)
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBookDTO {
    pub title: String,
    pub year: Option<i64>,
    pub author_id: i64,
    pub genre_id: Option<i64>,
    pub owner_id: Option<i64>,
}

impl Record for CreateBookDTO {
    const RULES: &'static [FieldRule] = BOOK_RULES;

    fn values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("title", FieldValue::Text(&self.title)),
            ("year", self.year.into()),
            ("author", FieldValue::Reference(self.author_id)),
            ("genre", self.genre_id.map_or(FieldValue::Null, FieldValue::Reference)),
        ]
    }
}

/// Partial update, body of `PATCH /books/{id}/`. Only `Some(_)` fields are written.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateBookDTO {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub year: Option<Option<i64>>,
    pub author: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub genre: Option<Option<i64>>,
}

impl UpdateBookDTO {
    /// Merges the update into the current row; the owner is never changed.
    pub fn apply_to(&self, current: &Book) -> CreateBookDTO {
        CreateBookDTO {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            year: self.year.unwrap_or(current.year),
            author_id: self.author.unwrap_or(current.author_id),
            genre_id: self.genre.unwrap_or(current.genre_id),
            owner_id: current.owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            book_id: 1,
            title: "Книга".to_string(),
            year: Some(1510),
            author_id: 1,
            genre_id: Some(1),
            owner_id: Some(1),
        }
    }

    #[test]
    fn test_patch_distinguishes_missing_from_null() {
        let missing: UpdateBookDTO = serde_json::from_str(r#"{"title": "Новая"}"#).unwrap();
        assert_eq!(missing.year, None);

        let null: UpdateBookDTO = serde_json::from_str(r#"{"year": null}"#).unwrap();
        assert_eq!(null.year, Some(None));

        let merged = null.apply_to(&book());
        assert_eq!(merged.year, None);
        assert_eq!(merged.title, "Книга");
    }

    #[test]
    fn test_request_ignores_client_owner() {
        let body: BookRequestDTO =
            serde_json::from_str(r#"{"title": "Книга 2", "author": 1, "owner": 99}"#).unwrap();
        let create = body.into_create(1).unwrap();
        assert_eq!(create.owner_id, Some(1));
        assert_eq!(create.genre_id, None);
    }

    #[test]
    fn test_request_without_author_reports_the_field() {
        let body: BookRequestDTO = serde_json::from_str(r#"{"title": "Без автора"}"#).unwrap();
        let errors = body.into_update().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("author"));
        assert!(!fields.contains_key("title"));
    }

    #[test]
    fn test_wire_shape_has_no_key() {
        let value = serde_json::to_value(BookDTO::from(book())).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title": "Книга", "year": 1510, "author": 1, "genre": 1, "owner": 1})
        );
    }
}
