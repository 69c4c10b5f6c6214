//! CommentRepository - comments are always accessed through their book

use super::validation::validate_record;
use super::{Create, Delete, Read, StoreError, Update};
use crate::dtos::{CreateCommentDTO, UpdateCommentDTO};
use crate::entities::Comment;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

const SELECT_COMMENT: &str =
    "SELECT comment_id, book_id, owner_id, text, created_at FROM comments";

pub struct CommentRepository {
    connection_pool: SqlitePool,
}

impl CommentRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// All comments of a book, oldest first
    ///
    /// The book is not looked up: an unknown `book_id` simply yields an empty list.
    #[instrument(skip(self), fields(book_id = %book_id))]
    pub async fn find_many_by_book_id(&self, book_id: &i64) -> Result<Vec<Comment>, StoreError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "{SELECT_COMMENT} WHERE book_id = ? ORDER BY comment_id"
        ))
        .bind(book_id)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} comments", comments.len());
        Ok(comments)
    }

    /// A single comment, only if it belongs to `book_id`
    #[instrument(skip(self), fields(book_id = %book_id, comment_id = %comment_id))]
    pub async fn find_by_book_and_id(
        &self,
        book_id: &i64,
        comment_id: &i64,
    ) -> Result<Option<Comment>, StoreError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "{SELECT_COMMENT} WHERE book_id = ? AND comment_id = ?"
        ))
        .bind(book_id)
        .bind(comment_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(comment)
    }
}

impl Create<Comment, CreateCommentDTO> for CommentRepository {
    #[instrument(skip(self, data), fields(book_id = %data.book_id))]
    async fn create(&self, data: &CreateCommentDTO) -> Result<Comment, StoreError> {
        validate_record(&self.connection_pool, data).await?;

        let result = sqlx::query(
            "INSERT INTO comments (book_id, owner_id, text, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(data.book_id)
        .bind(data.owner_id)
        .bind(&data.text)
        .bind(data.created_at)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Comment created with id {}", new_id);

        Ok(Comment {
            comment_id: new_id,
            book_id: data.book_id,
            owner_id: data.owner_id,
            text: data.text.clone(),
            created_at: data.created_at,
        })
    }
}

impl Read<Comment, i64> for CommentRepository {
    #[instrument(skip(self), fields(comment_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Comment>, StoreError> {
        let comment =
            sqlx::query_as::<_, Comment>(&format!("{SELECT_COMMENT} WHERE comment_id = ?"))
                .bind(id)
                .fetch_optional(&self.connection_pool)
                .await?;

        Ok(comment)
    }
}

impl Update<Comment, UpdateCommentDTO, i64> for CommentRepository {
    /// Only the text is written; `created_at` is never touched
    #[instrument(skip(self, data), fields(comment_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateCommentDTO) -> Result<Comment, StoreError> {
        let current = self.read(id).await?.ok_or(StoreError::NotFound)?;
        let merged = data.apply_to(&current);
        validate_record(&self.connection_pool, &merged).await?;

        sqlx::query("UPDATE comments SET text = ? WHERE comment_id = ?")
            .bind(&merged.text)
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        info!("Comment updated");
        self.read(id).await?.ok_or(StoreError::NotFound)
    }
}

impl Delete<i64> for CommentRepository {
    #[instrument(skip(self), fields(comment_id = %id))]
    async fn delete(&self, id: &i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!("Comment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::{CreateAuthorDTO, CreateBookDTO};
    use crate::repositories::testing::{seed_users, test_pool};
    use crate::repositories::{AuthorRepository, BookRepository, UserRepository};
    use chrono::Utc;

    async fn setup() -> (BookRepository, CommentRepository, UserRepository) {
        let pool = test_pool().await;
        seed_users(&pool).await;
        AuthorRepository::new(pool.clone())
            .create(&CreateAuthorDTO {
                full_name: "Автор".to_string(),
                birthday: 1495,
                owner_id: None,
            })
            .await
            .unwrap();
        let books = BookRepository::new(pool.clone());
        for title in ["Книга", "Другая книга"] {
            books
                .create(&CreateBookDTO {
                    title: title.to_string(),
                    year: None,
                    author_id: 1,
                    genre_id: None,
                    owner_id: Some(1),
                })
                .await
                .unwrap();
        }
        (
            books,
            CommentRepository::new(pool.clone()),
            UserRepository::new(pool),
        )
    }

    fn comment(book_id: i64, owner_id: i64, text: &str) -> CreateCommentDTO {
        CreateCommentDTO {
            book_id,
            owner_id: Some(owner_id),
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_filter_returns_only_the_books_comments() {
        let (_, comments, _) = setup().await;
        let a = comments.create(&comment(1, 1, "первый")).await.unwrap();
        comments.create(&comment(2, 1, "чужой")).await.unwrap();
        let b = comments.create(&comment(1, 2, "второй")).await.unwrap();

        let found = comments.find_many_by_book_id(&1).await.unwrap();
        assert_eq!(found, vec![a.clone(), b]);

        assert!(comments.find_many_by_book_id(&999).await.unwrap().is_empty());

        assert_eq!(comments.find_by_book_and_id(&1, &a.comment_id).await.unwrap(), Some(a.clone()));
        assert_eq!(comments.find_by_book_and_id(&2, &a.comment_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_comment_on_missing_book_is_rejected() {
        let (_, comments, _) = setup().await;
        let err = comments.create(&comment(999, 1, "текст")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let (_, comments, _) = setup().await;
        let created = comments.create(&comment(1, 1, "Тест")).await.unwrap();

        let updated = comments
            .update(
                &created.comment_id,
                &UpdateCommentDTO {
                    text: Some("Измененный текст".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.text, "Измененный текст");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.book_id, created.book_id);
    }

    #[tokio::test]
    async fn test_deleting_book_cascades_to_comments() {
        let (books, comments, _) = setup().await;
        let created = comments.create(&comment(1, 1, "Тест")).await.unwrap();

        books.delete(&1).await.unwrap();

        assert!(comments.read(&created.comment_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleting_user_removes_comments_but_keeps_books() {
        let (books, comments, users) = setup().await;
        let by_alice = comments.create(&comment(1, 1, "alice")).await.unwrap();
        let by_bob = comments.create(&comment(1, 2, "bob")).await.unwrap();

        users.delete(&1).await.unwrap();

        assert!(comments.read(&by_alice.comment_id).await.unwrap().is_none());
        assert!(comments.read(&by_bob.comment_id).await.unwrap().is_some());
        let book = books.read(&1).await.unwrap().unwrap();
        assert_eq!(book.owner_id, None);
    }
}
