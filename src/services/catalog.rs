//! Catalog services - read-only genres and authors

use crate::core::{AppError, AppState};
use crate::dtos::{AuthorDTO, GenreDTO};
use crate::repositories::{Read, ReadAll};
use axum::extract::{Json, Path, State};
use std::sync::Arc;
use tracing::{debug, instrument};

#[instrument(skip(state))]
pub async fn list_genres(State(state): State<Arc<AppState>>) -> Result<Json<Vec<GenreDTO>>, AppError> {
    let genres = state.genre.read_all().await?;
    debug!("Listing {} genres", genres.len());
    Ok(Json(genres.into_iter().map(GenreDTO::from).collect()))
}

#[instrument(skip(state), fields(genre_id = %genre_id))]
pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    Path(genre_id): Path<i64>,
) -> Result<Json<GenreDTO>, AppError> {
    let genre = state
        .genre
        .read(&genre_id)
        .await?
        .ok_or_else(|| AppError::not_found("Genre not found"))?;
    Ok(Json(GenreDTO::from(genre)))
}

#[instrument(skip(state))]
pub async fn list_authors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AuthorDTO>>, AppError> {
    let authors = state.author.read_all().await?;
    debug!("Listing {} authors", authors.len());
    Ok(Json(authors.into_iter().map(AuthorDTO::from).collect()))
}
