//! Comment DTOs

use crate::entities::Comment;
use crate::entities::schema::{self, COMMENT_RULES, FieldRule, FieldValue, Record};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommentDTO {
    pub id: i64,
    pub owner: Option<i64>,
    pub book: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDTO {
    fn from(value: Comment) -> Self {
        Self {
            id: value.comment_id,
            owner: value.owner_id,
            book: value.book_id,
            text: value.text,
            created_at: value.created_at,
        }
    }
}

/// Body of `POST` and `PUT` on comments. The book comes from the path, the owner
/// from the principal and the timestamp from the server; other fields are ignored.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CommentRequestDTO {
    pub text: Option<String>,
}

impl Record for CommentRequestDTO {
    const RULES: &'static [FieldRule] = COMMENT_RULES;

    fn values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![("text", self.text.as_deref().map_or(FieldValue::Missing, FieldValue::Text))]
    }
}

impl CommentRequestDTO {
    fn required(self) -> Result<String, ValidationErrors> {
        let errors = schema::missing(&self);
        self.text.ok_or(errors)
    }

    /// `created_at` is kept to microseconds, the precision exposed on the wire
    pub fn into_create(
        self,
        book_id: i64,
        owner_id: i64,
    ) -> Result<CreateCommentDTO, ValidationErrors> {
        Ok(CreateCommentDTO {
            book_id,
            owner_id: Some(owner_id),
            text: self.required()?,
            created_at: Utc::now().trunc_subsecs(6),
        })
    }

    pub fn into_update(self) -> Result<UpdateCommentDTO, ValidationErrors> {
        Ok(UpdateCommentDTO {
            text: Some(self.required()?),
        })
    }
}

/// DTO for inserting a comment (without comment_id)
#[derive(Debug, Clone)]
pub struct CreateCommentDTO {
    pub book_id: i64,
    pub owner_id: Option<i64>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Record for CreateCommentDTO {
    const RULES: &'static [FieldRule] = COMMENT_RULES;

    fn values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("text", FieldValue::Text(&self.text)),
            ("book", FieldValue::Reference(self.book_id)),
        ]
    }
}

/// Partial update, body of `PATCH`. Only the text of a comment is mutable.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateCommentDTO {
    pub text: Option<String>,
}

impl UpdateCommentDTO {
    /// Merges the update into the current row; book, owner and timestamp are kept.
    pub fn apply_to(&self, current: &Comment) -> CreateCommentDTO {
        CreateCommentDTO {
            book_id: current.book_id,
            owner_id: current.owner_id,
            text: self.text.clone().unwrap_or_else(|| current.text.clone()),
            created_at: current.created_at,
        }
    }
}
