use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::{ApiError, ApiResult},
    db::repositories::FollowerRepository,
    state::AppState,
};
use pulse_types::{CreateFollowerRequest, Follower};

/// GET /followers - List all follower relations
pub async fn get_followers(State(state): State<AppState>) -> ApiResult<Json<Vec<Follower>>> {
    let repo = FollowerRepository::new(state.db.pool.clone());
    let followers = repo.list()?;
    Ok(Json(followers))
}

/// GET /followers/:id - Fetch a single follower relation
pub async fn get_follower(
    State(state): State<AppState>,
    Path(follower_id): Path<i64>,
) -> ApiResult<Json<Follower>> {
    let repo = FollowerRepository::new(state.db.pool.clone());
    let follower = repo.get_by_id(follower_id)?.ok_or_else(|| {
        ApiError::NotFound(format!("Follower with ID {follower_id} not found"))
    })?;
    Ok(Json(follower))
}

/// POST /followers - Create a follower relation. Both user foreign keys
/// are validated by the database.
pub async fn create_follower(
    State(state): State<AppState>,
    Json(payload): Json<CreateFollowerRequest>,
) -> ApiResult<Json<Follower>> {
    let repo = FollowerRepository::new(state.db.pool.clone());
    let follower = repo.create(&payload)?;
    tracing::info!(
        "user {} now follows user {}",
        follower.follower_user_id,
        follower.user_id
    );
    Ok(Json(follower))
}

/// DELETE /followers/:id - Remove a follower relation
pub async fn delete_follower(
    State(state): State<AppState>,
    Path(follower_id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = FollowerRepository::new(state.db.pool.clone());

    if repo.get_by_id(follower_id)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Follower with ID {follower_id} not found"
        )));
    }

    repo.delete(follower_id)?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "message": format!("Follower with ID {follower_id} has been deleted"),
    })))
}
