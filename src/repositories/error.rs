//! Store-level error

use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A field constraint was violated or a referenced row does not exist
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The key does not resolve to a row
    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Database(sqlx::Error),
}

/// Key used for errors that belong to the record rather than to one field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// A referenced row can vanish between the existence check and the write; the
/// foreign key then rejects the statement and that is still a validation failure.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let foreign_key_violation = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_foreign_key_violation());
        if !foreign_key_violation {
            return StoreError::Database(err);
        }

        let mut error = ValidationError::new("does_not_exist");
        error.message = Some(Cow::Borrowed("Referenced object does not exist."));
        let mut errors = ValidationErrors::new();
        errors.add(NON_FIELD_ERRORS, error);
        StoreError::Validation(errors)
    }
}
