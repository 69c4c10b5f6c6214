//! Comment services - comments nested under `/books/{book_id}/comments/`
//!
//! Every lookup is scoped to the book in the path, so a comment of another book
//! is reported as missing.

use super::parse_body;
use crate::core::{AppError, AppState, require_owner};
use crate::dtos::{CommentDTO, CommentRequestDTO, UpdateCommentDTO};
use crate::entities::{Comment, User};
use crate::repositories::{Create, Delete, Update};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

async fn load_comment(state: &AppState, book_id: i64, comment_id: i64) -> Result<Comment, AppError> {
    state
        .comment
        .find_by_book_and_id(&book_id, &comment_id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment not found"))
}

#[instrument(skip(state), fields(book_id = %book_id))]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<i64>,
) -> Result<Json<Vec<CommentDTO>>, AppError> {
    let comments = state.comment.find_many_by_book_id(&book_id).await?;
    debug!("Listing {} comments", comments.len());
    Ok(Json(comments.into_iter().map(CommentDTO::from).collect()))
}

/// The book is taken from the path; a missing book is a validation error on `book`
#[instrument(skip(state, current_user, body), fields(book_id = %book_id, user_id = %current_user.user_id))]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(book_id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    let body: CommentRequestDTO = parse_body(body)?;
    let comment = state
        .comment
        .create(&body.into_create(book_id, current_user.user_id)?)
        .await?;

    info!("Comment {} created", comment.comment_id);
    Ok((StatusCode::CREATED, Json(CommentDTO::from(comment))))
}

#[instrument(skip(state), fields(book_id = %book_id, comment_id = %comment_id))]
pub async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path((book_id, comment_id)): Path<(i64, i64)>,
) -> Result<Json<CommentDTO>, AppError> {
    let comment = load_comment(&state, book_id, comment_id).await?;
    Ok(Json(CommentDTO::from(comment)))
}

#[instrument(skip(state, current_user, body), fields(book_id = %book_id, comment_id = %comment_id))]
pub async fn replace_comment(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((book_id, comment_id)): Path<(i64, i64)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CommentDTO>, AppError> {
    let decode = |body: serde_json::Value| -> Result<UpdateCommentDTO, AppError> {
        Ok(parse_body::<CommentRequestDTO>(body)?.into_update()?)
    };
    apply_update(&state, &current_user, (book_id, comment_id), decode, body).await
}

#[instrument(skip(state, current_user, body), fields(book_id = %book_id, comment_id = %comment_id))]
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((book_id, comment_id)): Path<(i64, i64)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CommentDTO>, AppError> {
    let key = (book_id, comment_id);
    apply_update(&state, &current_user, key, parse_body::<UpdateCommentDTO>, body).await
}

/// Order of checks: unknown comment (404), not the owner (403), then the body (400)
async fn apply_update(
    state: &AppState,
    current_user: &User,
    (book_id, comment_id): (i64, i64),
    decode: impl FnOnce(serde_json::Value) -> Result<UpdateCommentDTO, AppError>,
    body: serde_json::Value,
) -> Result<Json<CommentDTO>, AppError> {
    let comment = load_comment(state, book_id, comment_id).await?;
    require_owner(current_user, &comment)?;

    let update = decode(body)?;
    let updated = state.comment.update(&comment.comment_id, &update).await?;
    info!("Comment {} updated", comment_id);
    Ok(Json(CommentDTO::from(updated)))
}

#[instrument(skip(state, current_user), fields(book_id = %book_id, comment_id = %comment_id))]
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((book_id, comment_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    let comment = load_comment(&state, book_id, comment_id).await?;
    require_owner(&current_user, &comment)?;

    state.comment.delete(&comment.comment_id).await?;
    info!("Comment {} deleted", comment_id);
    Ok(StatusCode::NO_CONTENT)
}
