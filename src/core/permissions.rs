//! Ownership authorization
//!
//! Reads and creates are open to every authenticated principal. Updates and
//! deletes go through [`may_mutate`]: only the recorded owner may mutate, and an
//! entity without an owner cannot be mutated by anyone.

use super::AppError;
use crate::entities::{Author, Book, Comment, Genre, Library, User};
use tracing::warn;

/// An entity that records the principal who created it
pub trait Owned {
    fn owner_id(&self) -> Option<i64>;
}

impl Owned for Library {
    fn owner_id(&self) -> Option<i64> {
        self.owner_id
    }
}

impl Owned for Genre {
    fn owner_id(&self) -> Option<i64> {
        self.owner_id
    }
}

impl Owned for Author {
    fn owner_id(&self) -> Option<i64> {
        self.owner_id
    }
}

impl Owned for Book {
    fn owner_id(&self) -> Option<i64> {
        self.owner_id
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Option<i64> {
        self.owner_id
    }
}

/// `true` iff the entity has an owner and it is `principal`
pub fn may_mutate<E: Owned + ?Sized>(principal: &User, entity: &E) -> bool {
    entity
        .owner_id()
        .is_some_and(|owner| owner == principal.user_id)
}

/// [`may_mutate`] as a guard for handlers: denial becomes 403
pub fn require_owner<E: Owned + ?Sized>(principal: &User, entity: &E) -> Result<(), AppError> {
    if may_mutate(principal, entity) {
        Ok(())
    } else {
        warn!(
            "User {} may not mutate an entity owned by {:?}",
            principal.user_id,
            entity.owner_id()
        );
        Err(AppError::forbidden(
            "You do not have permission to perform this action.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn user(user_id: i64) -> User {
        User {
            user_id,
            username: format!("user{user_id}"),
            password: String::new(),
        }
    }

    fn book(owner_id: Option<i64>) -> Book {
        Book {
            book_id: 1,
            title: "Книга".to_string(),
            year: Some(1510),
            author_id: 1,
            genre_id: None,
            owner_id,
        }
    }

    #[test]
    fn test_no_owner_means_nobody_may_mutate() {
        let orphan = book(None);
        for id in [1, 2, 42] {
            assert!(!may_mutate(&user(id), &orphan));
        }
    }

    #[test]
    fn test_only_owner_may_mutate() {
        let owned = book(Some(1));
        assert!(may_mutate(&user(1), &owned));
        assert!(!may_mutate(&user(2), &owned));
    }

    #[test]
    fn test_rule_applies_to_every_owned_entity() {
        let genre = Genre {
            genre_id: 1,
            title: "Жанр".to_string(),
            owner_id: Some(2),
        };
        let library = Library {
            library_id: 1,
            title: "Библиотека".to_string(),
            address: "Дом и улица".to_string(),
            working_hours: "09:00 - 17:00".to_string(),
            owner_id: None,
        };
        assert!(may_mutate(&user(2), &genre));
        assert!(!may_mutate(&user(1), &genre));
        assert!(!may_mutate(&user(2), &library));
    }

    #[test]
    fn test_require_owner_forbids() {
        let err = require_owner(&user(2), &book(Some(1))).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert!(require_owner(&user(1), &book(Some(1))).is_ok());
    }
}
