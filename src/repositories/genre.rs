//! GenreRepository

use super::validation::validate_record;
use super::{Create, Delete, Read, ReadAll, StoreError, Update};
use crate::dtos::{CreateGenreDTO, UpdateGenreDTO};
use crate::entities::Genre;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

pub struct GenreRepository {
    connection_pool: SqlitePool,
}

impl GenreRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }
}

impl Create<Genre, CreateGenreDTO> for GenreRepository {
    #[instrument(skip(self, data), fields(title = %data.title))]
    async fn create(&self, data: &CreateGenreDTO) -> Result<Genre, StoreError> {
        validate_record(&self.connection_pool, data).await?;

        let result = sqlx::query("INSERT INTO genres (title, owner_id) VALUES (?, ?)")
            .bind(&data.title)
            .bind(data.owner_id)
            .execute(&self.connection_pool)
            .await?;

        let new_id = result.last_insert_rowid();
        info!("Genre created with id {}", new_id);

        Ok(Genre {
            genre_id: new_id,
            title: data.title.clone(),
            owner_id: data.owner_id,
        })
    }
}

impl Read<Genre, i64> for GenreRepository {
    #[instrument(skip(self), fields(genre_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Genre>, StoreError> {
        let genre = sqlx::query_as::<_, Genre>(
            "SELECT genre_id, title, owner_id FROM genres WHERE genre_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(genre)
    }
}

impl ReadAll<Genre> for GenreRepository {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<Genre>, StoreError> {
        let genres = sqlx::query_as::<_, Genre>(
            "SELECT genre_id, title, owner_id FROM genres ORDER BY genre_id",
        )
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(genres)
    }
}

impl Update<Genre, UpdateGenreDTO, i64> for GenreRepository {
    #[instrument(skip(self, data), fields(genre_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateGenreDTO) -> Result<Genre, StoreError> {
        let current = self.read(id).await?.ok_or(StoreError::NotFound)?;
        let merged = data.apply_to(&current);
        validate_record(&self.connection_pool, &merged).await?;

        sqlx::query("UPDATE genres SET title = ? WHERE genre_id = ?")
            .bind(&merged.title)
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        debug!("Genre updated");
        self.read(id).await?.ok_or(StoreError::NotFound)
    }
}

impl Delete<i64> for GenreRepository {
    /// Books of the genre are kept with their genre cleared
    #[instrument(skip(self), fields(genre_id = %id))]
    async fn delete(&self, id: &i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM genres WHERE genre_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!("Genre deleted");
        Ok(())
    }
}
