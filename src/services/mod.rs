//! Services module - HTTP handlers
//!
//! One module per resource. Handlers compose the repositories held by
//! [`AppState`] with the ownership guard from `core::permissions`.

pub mod auth;
pub mod book;
pub mod catalog;
pub mod comment;
pub mod user;

// Re-exports
pub use auth::{login_user, register_user};
pub use book::{create_book, delete_book, get_book, list_books, replace_book, update_book};
pub use catalog::{get_genre, list_authors, list_genres};
pub use comment::{
    create_comment, delete_comment, get_comment, list_comments, replace_comment, update_comment,
};
pub use user::{delete_my_account, get_me};

use crate::{AppError, AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}

/// Decodes a request body taken as raw JSON.
///
/// Mutating handlers receive `Json<serde_json::Value>` and decode it only after the
/// target was found and the principal was allowed to touch it, so a body of the
/// wrong shape is a 400 that never masks a 404 or 403.
pub(crate) fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| {
        warn!("Rejected request body: {}", e);
        AppError::bad_request("Invalid request body").with_details(e.to_string())
    })
}
