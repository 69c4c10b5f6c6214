use axum_test::TestServer;
use catalog::core::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const JWT_SECRET: &str = "catalog-test-secret-that-is-long-enough";

/// Builds an AppState for the tests
///
/// # Arguments
/// * `pool` - SQLite pool prepared by `#[sqlx::test]`
///
/// # Returns
/// Arc<AppState> configured with the test JWT secret
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, JWT_SECRET.to_string()))
}

/// Builds a TestServer for the tests
///
/// # Arguments
/// * `state` - AppState used by the server
///
/// # Returns
/// TestServer configured and ready to run requests
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = catalog::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Generates a JWT token for testing
///
/// # Arguments
/// * `user_id` - ID of the user the token is issued to
/// * `username` - Username of the user
/// * `jwt_secret` - Secret key used to sign the token
///
/// # Returns
/// JWT token valid for 24 hours
pub fn create_test_jwt(user_id: i64, username: &str, jwt_secret: &str) -> String {
    create_jwt_expiring_in(user_id, username, jwt_secret, chrono::Duration::hours(24))
}

/// Like [`create_test_jwt`], with a custom lifetime (negative for an expired token)
pub fn create_jwt_expiring_in(
    user_id: i64,
    username: &str,
    jwt_secret: &str,
    lifetime: chrono::Duration,
) -> String {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Claims {
        id: i64,
        username: String,
        exp: usize,
        iat: usize,
    }

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(lifetime)
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        id: user_id,
        username: username.to_string(),
        exp: expiration,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("Failed to create JWT token")
}

/// `Bearer <token>` for the given fixture user
pub fn bearer(user_id: i64, username: &str) -> String {
    format!("Bearer {}", create_test_jwt(user_id, username, JWT_SECRET))
}
