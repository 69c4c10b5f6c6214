//! Book services - CRUD over `/books/`

use super::parse_body;
use crate::core::{AppError, AppState, require_owner};
use crate::dtos::{BookDTO, BookRequestDTO, UpdateBookDTO};
use crate::entities::{Book, User};
use crate::repositories::{Create, Delete, Read, ReadAll, Update};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

async fn load_book(state: &AppState, book_id: i64) -> Result<Book, AppError> {
    state
        .book
        .read(&book_id)
        .await?
        .ok_or_else(|| AppError::not_found("Book not found"))
}

#[instrument(skip(state))]
pub async fn list_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<BookDTO>>, AppError> {
    let books = state.book.read_all().await?;
    debug!("Listing {} books", books.len());
    Ok(Json(books.into_iter().map(BookDTO::from).collect()))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    let body: BookRequestDTO = parse_body(body)?;
    let book = state
        .book
        .create(&body.into_create(current_user.user_id)?)
        .await?;

    info!("Book {} created", book.book_id);
    Ok((StatusCode::CREATED, Json(BookDTO::from(book))))
}

#[instrument(skip(state), fields(book_id = %book_id))]
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<i64>,
) -> Result<Json<BookDTO>, AppError> {
    let book = load_book(&state, book_id).await?;
    Ok(Json(BookDTO::from(book)))
}

/// `PUT`: the body is the whole writable shape, omitted nullable fields become null
#[instrument(skip(state, current_user, body), fields(book_id = %book_id, user_id = %current_user.user_id))]
pub async fn replace_book(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(book_id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<BookDTO>, AppError> {
    let decode = |body: serde_json::Value| -> Result<UpdateBookDTO, AppError> {
        Ok(parse_body::<BookRequestDTO>(body)?.into_update()?)
    };
    apply_update(&state, &current_user, book_id, decode, body).await
}

/// `PATCH`: only the supplied fields are written
#[instrument(skip(state, current_user, body), fields(book_id = %book_id, user_id = %current_user.user_id))]
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(book_id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<BookDTO>, AppError> {
    apply_update(&state, &current_user, book_id, parse_body::<UpdateBookDTO>, body).await
}

/// Order of checks: unknown book (404), not the owner (403), then the body (400)
async fn apply_update(
    state: &AppState,
    current_user: &User,
    book_id: i64,
    decode: impl FnOnce(serde_json::Value) -> Result<UpdateBookDTO, AppError>,
    body: serde_json::Value,
) -> Result<Json<BookDTO>, AppError> {
    let book = load_book(state, book_id).await?;
    require_owner(current_user, &book)?;

    let update = decode(body)?;
    let updated = state.book.update(&book_id, &update).await?;
    info!("Book {} updated", book_id);
    Ok(Json(BookDTO::from(updated)))
}

#[instrument(skip(state, current_user), fields(book_id = %book_id, user_id = %current_user.user_id))]
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(book_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let book = load_book(&state, book_id).await?;
    require_owner(&current_user, &book)?;

    // Comments go with the book through the foreign key
    state.book.delete(&book_id).await?;
    info!("Book {} deleted", book_id);
    Ok(StatusCode::NO_CONTENT)
}
