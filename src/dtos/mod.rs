//! DTOs module - Data Transfer Objects
//!
//! Wire representations exchanged with the client, and the input records handed to
//! the repositories. DTOs keep the external field names (`author`, `owner`, ...)
//! apart from the column names used by the entities (`author_id`, `owner_id`, ...).

pub mod author;
pub mod book;
pub mod comment;
pub mod genre;
pub mod library;
pub mod user;

pub use author::{AuthorDTO, CreateAuthorDTO, UpdateAuthorDTO};
pub use book::{BookDTO, BookRequestDTO, CreateBookDTO, UpdateBookDTO};
pub use comment::{CommentDTO, CommentRequestDTO, CreateCommentDTO, UpdateCommentDTO};
pub use genre::{CreateGenreDTO, GenreDTO, UpdateGenreDTO};
pub use library::{CreateLibraryDTO, UpdateLibraryDTO};
pub use user::{CreateUserDTO, LoginDTO, TokenDTO, UserDTO};

use serde::{Deserialize, Deserializer};

/// Distinguishes a missing field (`None`) from an explicit `null` (`Some(None)`).
///
/// Use together with `#[serde(default)]` on nullable fields of partial updates.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
