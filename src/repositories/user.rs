//! UserRepository - principals

use super::{Create, Delete, Read, StoreError};
use crate::dtos::CreateUserDTO;
use crate::entities::User;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> UserRepository {
        Self { connection_pool }
    }

    /// Usernames are unique, so at most one user matches
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    /// `data.password` must already be hashed
    #[instrument(skip(self, data), fields(username = %data.username))]
    async fn create(&self, data: &CreateUserDTO) -> Result<User, StoreError> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(&data.username)
            .bind(&data.password)
            .execute(&self.connection_pool)
            .await?;

        let new_id = result.last_insert_rowid();
        info!("User created with id {}", new_id);

        Ok(User {
            user_id: new_id,
            username: data.username.clone(),
            password: data.password.clone(),
        })
    }
}

impl Read<User, i64> for UserRepository {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, password FROM users WHERE user_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl Delete<i64> for UserRepository {
    /// Physical delete: owned books, genres, authors and libraries lose their owner,
    /// the user's comments are removed
    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete(&self, id: &i64) -> Result<(), StoreError> {
        debug!("Deleting user");
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!("User deleted");
        Ok(())
    }
}
