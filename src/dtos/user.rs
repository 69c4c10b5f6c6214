//! User DTOs - registration, login and the public user shape

use crate::entities::User;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref USERNAME_RE: Regex =
        Regex::new(r"^[A-Za-z0-9@.+_-]+$").expect("username pattern is a valid regex");
}

/// User as exposed to the client, never carries the password
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserDTO {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.user_id,
            username: value.username,
        }
    }
}

/// DTO for registering a new user (without user_id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[validate(
        length(min = 3, max = 150, message = "Username must be between 3 and 150 characters"),
        regex(path = *USERNAME_RE, message = "Username may contain only letters, digits and @.+-_")
    )]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenDTO {
    pub token: String,
}
