use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    api::{ApiError, ApiResult},
    db::repositories::UserRepository,
    state::AppState,
};
use pulse_types::{CreateUserRequest, UpdateUserRequest, User};

#[derive(Deserialize)]
pub struct ListUsersQuery {
    #[serde(default = "default_limit")]
    limit: i64,
}

fn default_limit() -> i64 {
    10
}

/// GET /users - List users, capped at `limit` (default 10)
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<Vec<User>>> {
    let repo = UserRepository::new(state.db.pool.clone());
    let users = repo.list(query.limit)?;
    Ok(Json(users))
}

/// GET /users/:id - Fetch a single user
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<User>> {
    let repo = UserRepository::new(state.db.pool.clone());
    let user = repo
        .get_by_id(user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("User with ID {user_id} not found")))?;
    Ok(Json(user))
}

/// POST /users - Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<Json<User>> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::BadRequest("username cannot be empty".to_string()));
    }

    let repo = UserRepository::new(state.db.pool.clone());

    // Friendly message for the common case; the UNIQUE constraint still
    // backstops concurrent creates.
    if repo.username_exists(&payload.username)? {
        return Err(ApiError::BadRequest("Username already taken".to_string()));
    }

    let user = repo.create(&payload)?;
    tracing::info!("created user {} ({})", user.user_id, user.username);
    Ok(Json(user))
}

/// PUT /users/:id - Partial update of username/bio
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    let repo = UserRepository::new(state.db.pool.clone());

    if repo.get_by_id(user_id)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }

    repo.update(user_id, payload.username.as_deref(), payload.bio.as_deref())?;

    let user = repo
        .get_by_id(user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("User with ID {user_id} not found")))?;
    Ok(Json(user))
}

/// DELETE /users/:id - Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = UserRepository::new(state.db.pool.clone());

    if repo.get_by_id(user_id)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }

    repo.delete(user_id)?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "message": format!("User with ID {user_id} has been deleted"),
    })))
}
