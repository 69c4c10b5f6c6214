//! Core Module - infrastructure shared by every endpoint
//!
//! - Authentication (JWT) and the authentication middleware
//! - Ownership authorization
//! - Configuration
//! - Database pool and migrations
//! - Error handling
//! - Application state

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod permissions;
pub mod state;

// Re-exports
pub use auth::{Claims, authentication_middleware, decode_jwt, encode_jwt};
pub use config::Config;
pub use error::AppError;
pub use permissions::{Owned, may_mutate, require_owner};
pub use state::AppState;
