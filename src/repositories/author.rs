//! AuthorRepository

use super::validation::validate_record;
use super::{Create, Delete, Read, ReadAll, StoreError, Update};
use crate::dtos::{CreateAuthorDTO, UpdateAuthorDTO};
use crate::entities::Author;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

pub struct AuthorRepository {
    connection_pool: SqlitePool,
}

impl AuthorRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }
}

impl Create<Author, CreateAuthorDTO> for AuthorRepository {
    #[instrument(skip(self, data), fields(full_name = %data.full_name))]
    async fn create(&self, data: &CreateAuthorDTO) -> Result<Author, StoreError> {
        validate_record(&self.connection_pool, data).await?;

        let result =
            sqlx::query("INSERT INTO authors (full_name, birthday, owner_id) VALUES (?, ?, ?)")
                .bind(&data.full_name)
                .bind(data.birthday)
                .bind(data.owner_id)
                .execute(&self.connection_pool)
                .await?;

        let new_id = result.last_insert_rowid();
        info!("Author created with id {}", new_id);

        Ok(Author {
            author_id: new_id,
            full_name: data.full_name.clone(),
            birthday: data.birthday,
            owner_id: data.owner_id,
        })
    }
}

impl Read<Author, i64> for AuthorRepository {
    #[instrument(skip(self), fields(author_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Author>, StoreError> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT author_id, full_name, birthday, owner_id FROM authors WHERE author_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(author)
    }
}

impl ReadAll<Author> for AuthorRepository {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<Author>, StoreError> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT author_id, full_name, birthday, owner_id FROM authors ORDER BY author_id",
        )
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(authors)
    }
}

impl Update<Author, UpdateAuthorDTO, i64> for AuthorRepository {
    #[instrument(skip(self, data), fields(author_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateAuthorDTO) -> Result<Author, StoreError> {
        let current = self.read(id).await?.ok_or(StoreError::NotFound)?;
        let merged = data.apply_to(&current);
        validate_record(&self.connection_pool, &merged).await?;

        sqlx::query("UPDATE authors SET full_name = ?, birthday = ? WHERE author_id = ?")
            .bind(&merged.full_name)
            .bind(merged.birthday)
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        debug!("Author updated");
        self.read(id).await?.ok_or(StoreError::NotFound)
    }
}

impl Delete<i64> for AuthorRepository {
    /// Removes the author's books too, and with them their comments
    #[instrument(skip(self), fields(author_id = %id))]
    async fn delete(&self, id: &i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM authors WHERE author_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!("Author deleted");
        Ok(())
    }
}
