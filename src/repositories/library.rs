//! LibraryRepository - libraries are persisted but not routed

use super::validation::validate_record;
use super::{Create, Delete, Read, ReadAll, StoreError, Update};
use crate::dtos::{CreateLibraryDTO, UpdateLibraryDTO};
use crate::entities::Library;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

const SELECT_LIBRARY: &str =
    "SELECT library_id, title, address, working_hours, owner_id FROM libraries";

pub struct LibraryRepository {
    connection_pool: SqlitePool,
}

impl LibraryRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Exact title match, served by `libraries_title_idx`
    #[instrument(skip(self))]
    pub async fn find_by_title(&self, title: &str) -> Result<Vec<Library>, StoreError> {
        let libraries = sqlx::query_as::<_, Library>(&format!(
            "{SELECT_LIBRARY} WHERE title = ? ORDER BY library_id"
        ))
        .bind(title)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(libraries)
    }
}

impl Create<Library, CreateLibraryDTO> for LibraryRepository {
    #[instrument(skip(self, data), fields(title = %data.title))]
    async fn create(&self, data: &CreateLibraryDTO) -> Result<Library, StoreError> {
        validate_record(&self.connection_pool, data).await?;

        let result = sqlx::query(
            "INSERT INTO libraries (title, address, working_hours, owner_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&data.title)
        .bind(&data.address)
        .bind(&data.working_hours)
        .bind(data.owner_id)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Library created with id {}", new_id);

        Ok(Library {
            library_id: new_id,
            title: data.title.clone(),
            address: data.address.clone(),
            working_hours: data.working_hours.clone(),
            owner_id: data.owner_id,
        })
    }
}

impl Read<Library, i64> for LibraryRepository {
    #[instrument(skip(self), fields(library_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Library>, StoreError> {
        let library =
            sqlx::query_as::<_, Library>(&format!("{SELECT_LIBRARY} WHERE library_id = ?"))
                .bind(id)
                .fetch_optional(&self.connection_pool)
                .await?;

        Ok(library)
    }
}

impl ReadAll<Library> for LibraryRepository {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<Library>, StoreError> {
        let libraries = sqlx::query_as::<_, Library>(&format!("{SELECT_LIBRARY} ORDER BY library_id"))
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(libraries)
    }
}

impl Update<Library, UpdateLibraryDTO, i64> for LibraryRepository {
    #[instrument(skip(self, data), fields(library_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateLibraryDTO) -> Result<Library, StoreError> {
        let current = self.read(id).await?.ok_or(StoreError::NotFound)?;
        let merged = data.apply_to(&current);
        validate_record(&self.connection_pool, &merged).await?;

        sqlx::query(
            "UPDATE libraries SET title = ?, address = ?, working_hours = ? WHERE library_id = ?",
        )
        .bind(&merged.title)
        .bind(&merged.address)
        .bind(&merged.working_hours)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        debug!("Library updated");
        self.read(id).await?.ok_or(StoreError::NotFound)
    }
}

impl Delete<i64> for LibraryRepository {
    #[instrument(skip(self), fields(library_id = %id))]
    async fn delete(&self, id: &i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM libraries WHERE library_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!("Library deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::testing::test_pool;

    fn library(title: &str) -> CreateLibraryDTO {
        CreateLibraryDTO {
            title: title.to_string(),
            address: "Дом и улица".to_string(),
            working_hours: "09:12 - 23:14".to_string(),
            owner_id: None,
        }
    }

    #[tokio::test]
    async fn test_crud_and_find_by_title() {
        let repo = LibraryRepository::new(test_pool().await);

        let first = repo.create(&library("Библиотека")).await.unwrap();
        let second = repo.create(&library("Другая")).await.unwrap();
        assert_eq!(first.library_id, 1);
        assert_eq!(second.library_id, 2);

        let found = repo.find_by_title("Библиотека").await.unwrap();
        assert_eq!(found, vec![first.clone()]);

        let updated = repo
            .update(
                &first.library_id,
                &UpdateLibraryDTO {
                    working_hours: Some("10:00 - 18:00".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.working_hours, "10:00 - 18:00");
        assert_eq!(updated.title, "Библиотека");

        repo.delete(&first.library_id).await.unwrap();
        assert!(repo.read(&first.library_id).await.unwrap().is_none());
        assert_eq!(repo.read_all().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn test_rejects_overlong_address() {
        let repo = LibraryRepository::new(test_pool().await);
        let mut data = library("Библиотека");
        data.address = "a".repeat(2049);

        let err = repo.create(&data).await.unwrap_err();
        match err {
            StoreError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("address"))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() {
        let repo = LibraryRepository::new(test_pool().await);
        assert!(matches!(repo.delete(&42).await, Err(StoreError::NotFound)));
        assert!(matches!(
            repo.update(&42, &UpdateLibraryDTO::default()).await,
            Err(StoreError::NotFound)
        ));
    }
}
