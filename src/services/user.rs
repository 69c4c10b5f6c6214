//! User services - the current principal's account

use crate::core::{AppError, AppState};
use crate::dtos::UserDTO;
use crate::entities::User;
use crate::repositories::Delete;
use axum::{
    Extension,
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, instrument};

#[instrument(skip(current_user), fields(user_id = %current_user.user_id))]
pub async fn get_me(Extension(current_user): Extension<User>) -> Json<UserDTO> {
    Json(UserDTO::from(current_user))
}

/// Deletes the caller's account. Their books, genres, authors and libraries stay
/// with no owner (and thus become immutable); their comments are removed.
#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn delete_my_account(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    info!("User account deletion initiated");
    state.user.delete(&current_user.user_id).await?;
    info!("Account deleted successfully");
    Ok(StatusCode::NO_CONTENT)
}
