//! Library catalog server - exposes the main modules for the binary and the tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod seed;
pub mod services;

// Re-export the main types for easier imports
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the application router, every API route lives under `/api/v1`
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api/v1", configure_api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn configure_api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    configure_auth_routes().merge(configure_protected_routes(state))
}

/// Login and registration, the only routes open to anonymous clients
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/auth/login", post(login_user))
        .route("/auth/register", post(register_user))
}

/// Catalog and account routes, all behind the authentication middleware
fn configure_protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/books/", get(list_books).post(create_book))
        .route(
            "/books/{book_id}/",
            get(get_book)
                .put(replace_book)
                .patch(update_book)
                .delete(delete_book),
        )
        .route(
            "/books/{book_id}/comments/",
            get(list_comments).post(create_comment),
        )
        .route(
            "/books/{book_id}/comments/{comment_id}/",
            get(get_comment)
                .put(replace_comment)
                .patch(update_comment)
                .delete(delete_comment),
        )
        .route("/genres/", get(list_genres))
        .route("/genres/{genre_id}/", get(get_genre))
        .route("/authors/", get(list_authors))
        .route("/users/me", get(get_me).delete(delete_my_account))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
