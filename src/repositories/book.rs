//! BookRepository

use super::validation::validate_record;
use super::{Create, Delete, Read, ReadAll, StoreError, Update};
use crate::dtos::{CreateBookDTO, UpdateBookDTO};
use crate::entities::Book;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

const SELECT_BOOK: &str = "SELECT book_id, title, year, author_id, genre_id, owner_id FROM books";

pub struct BookRepository {
    connection_pool: SqlitePool,
}

impl BookRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }
}

impl Create<Book, CreateBookDTO> for BookRepository {
    #[instrument(skip(self, data), fields(title = %data.title, author_id = %data.author_id))]
    async fn create(&self, data: &CreateBookDTO) -> Result<Book, StoreError> {
        validate_record(&self.connection_pool, data).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO books (title, year, author_id, genre_id, owner_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.title)
        .bind(data.year)
        .bind(data.author_id)
        .bind(data.genre_id)
        .bind(data.owner_id)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Book created with id {}", new_id);

        Ok(Book {
            book_id: new_id,
            title: data.title.clone(),
            year: data.year,
            author_id: data.author_id,
            genre_id: data.genre_id,
            owner_id: data.owner_id,
        })
    }
}

impl Read<Book, i64> for BookRepository {
    #[instrument(skip(self), fields(book_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Book>, StoreError> {
        let book = sqlx::query_as::<_, Book>(&format!("{SELECT_BOOK} WHERE book_id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        if book.is_none() {
            debug!("Book not found");
        }
        Ok(book)
    }
}

impl ReadAll<Book> for BookRepository {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<Book>, StoreError> {
        let books = sqlx::query_as::<_, Book>(&format!("{SELECT_BOOK} ORDER BY book_id"))
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(books)
    }
}

impl Update<Book, UpdateBookDTO, i64> for BookRepository {
    #[instrument(skip(self, data), fields(book_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateBookDTO) -> Result<Book, StoreError> {
        let current = self.read(id).await?.ok_or(StoreError::NotFound)?;
        let merged = data.apply_to(&current);
        validate_record(&self.connection_pool, &merged).await?;

        sqlx::query(
            r#"
            UPDATE books
            SET title = ?, year = ?, author_id = ?, genre_id = ?
            WHERE book_id = ?
            "#,
        )
        .bind(&merged.title)
        .bind(merged.year)
        .bind(merged.author_id)
        .bind(merged.genre_id)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        info!("Book updated");
        self.read(id).await?.ok_or(StoreError::NotFound)
    }
}

impl Delete<i64> for BookRepository {
    /// Removes the book's comments too
    #[instrument(skip(self), fields(book_id = %id))]
    async fn delete(&self, id: &i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE book_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!("Book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::{CreateAuthorDTO, CreateGenreDTO};
    use crate::repositories::testing::{seed_users, test_pool};
    use crate::repositories::{AuthorRepository, GenreRepository};

    struct Fixture {
        books: BookRepository,
        authors: AuthorRepository,
        genres: GenreRepository,
    }

    async fn fixture() -> Fixture {
        let pool = test_pool().await;
        seed_users(&pool).await;
        let fixture = Fixture {
            books: BookRepository::new(pool.clone()),
            authors: AuthorRepository::new(pool.clone()),
            genres: GenreRepository::new(pool),
        };
        fixture
            .authors
            .create(&CreateAuthorDTO {
                full_name: "Автор".to_string(),
                birthday: 1495,
                owner_id: None,
            })
            .await
            .unwrap();
        fixture
            .genres
            .create(&CreateGenreDTO {
                title: "Жанр".to_string(),
                owner_id: None,
            })
            .await
            .unwrap();
        fixture
    }

    fn book(title: &str) -> CreateBookDTO {
        CreateBookDTO {
            title: title.to_string(),
            year: Some(1510),
            author_id: 1,
            genre_id: Some(1),
            owner_id: Some(1),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_keys() {
        let f = fixture().await;
        let first = f.books.create(&book("Книга")).await.unwrap();
        let second = f.books.create(&book("Книга 2")).await.unwrap();
        assert_eq!(first.book_id, 1);
        assert_eq!(second.book_id, 2);

        let all = f.books.read_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_missing_author_is_a_validation_error() {
        let f = fixture().await;
        let mut data = book("Книга");
        data.author_id = 99;
        data.genre_id = Some(42);

        match f.books.create(&data).await.unwrap_err() {
            StoreError::Validation(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("author"));
                assert!(fields.contains_key("genre"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(f.books.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields_and_owner() {
        let f = fixture().await;
        let created = f.books.create(&book("Книга")).await.unwrap();

        let updated = f
            .books
            .update(
                &created.book_id,
                &UpdateBookDTO {
                    title: Some("Измененная книга".to_string()),
                    genre: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Измененная книга");
        assert_eq!(updated.year, Some(1510));
        assert_eq!(updated.genre_id, None);
        assert_eq!(updated.owner_id, Some(1));
    }

    #[tokio::test]
    async fn test_deleting_author_cascades_to_books() {
        let f = fixture().await;
        f.books.create(&book("Книга")).await.unwrap();
        f.books.create(&book("Книга 2")).await.unwrap();

        f.authors.delete(&1).await.unwrap();

        assert!(f.books.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_genre_clears_book_genre() {
        let f = fixture().await;
        let created = f.books.create(&book("Книга")).await.unwrap();

        f.genres.delete(&1).await.unwrap();

        let stored = f.books.read(&created.book_id).await.unwrap().unwrap();
        assert_eq!(stored.genre_id, None);
        assert_eq!(stored.title, "Книга");
    }
}
