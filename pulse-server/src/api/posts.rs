use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::{ApiError, ApiResult},
    db::repositories::PostRepository,
    state::AppState,
};
use pulse_types::{CreatePostRequest, Post, UpdatePostRequest};

/// GET /posts - List all posts
pub async fn get_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    let repo = PostRepository::new(state.db.pool.clone());
    let posts = repo.list()?;
    Ok(Json(posts))
}

/// GET /posts/:id - Fetch a single post
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> ApiResult<Json<Post>> {
    let repo = PostRepository::new(state.db.pool.clone());
    let post = repo
        .get_by_id(post_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Post with ID {post_id} not found")))?;
    Ok(Json(post))
}

/// POST /posts - Create a new post. The user foreign key is validated by
/// the database; a missing user comes back as 400.
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> ApiResult<Json<Post>> {
    if payload.media_type.trim().is_empty() {
        return Err(ApiError::BadRequest("media_type cannot be empty".to_string()));
    }
    if payload.media_url.trim().is_empty() {
        return Err(ApiError::BadRequest("media_url cannot be empty".to_string()));
    }

    let repo = PostRepository::new(state.db.pool.clone());
    let post = repo.create(&payload)?;
    tracing::info!("created post {} for user {}", post.post_id, post.user_id);
    Ok(Json(post))
}

/// PUT /posts/:id - Partial update of the caption
pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> ApiResult<Json<Post>> {
    let repo = PostRepository::new(state.db.pool.clone());

    if repo.get_by_id(post_id)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Post with ID {post_id} not found"
        )));
    }

    repo.update(post_id, payload.caption.as_deref())?;

    let post = repo
        .get_by_id(post_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Post with ID {post_id} not found")))?;
    Ok(Json(post))
}

/// DELETE /posts/:id - Delete a post
pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = PostRepository::new(state.db.pool.clone());

    if repo.get_by_id(post_id)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Post with ID {post_id} not found"
        )));
    }

    repo.delete(post_id)?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "message": format!("Post with ID {post_id} has been deleted"),
    })))
}
