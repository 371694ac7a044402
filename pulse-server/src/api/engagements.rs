use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::{ApiError, ApiResult},
    db::repositories::EngagementRepository,
    state::AppState,
};
use pulse_types::{CreateEngagementRequest, Engagement, UpdateEngagementRequest};

/// GET /engagements - List all engagement records
pub async fn get_engagements(State(state): State<AppState>) -> ApiResult<Json<Vec<Engagement>>> {
    let repo = EngagementRepository::new(state.db.pool.clone());
    let engagements = repo.list()?;
    Ok(Json(engagements))
}

/// GET /engagements/:id - Fetch a single engagement record
pub async fn get_engagement(
    State(state): State<AppState>,
    Path(engagement_id): Path<i64>,
) -> ApiResult<Json<Engagement>> {
    let repo = EngagementRepository::new(state.db.pool.clone());
    let engagement = repo.get_by_id(engagement_id)?.ok_or_else(|| {
        ApiError::NotFound(format!("Engagement with ID {engagement_id} not found"))
    })?;
    Ok(Json(engagement))
}

/// POST /engagements - Create an engagement record. The post foreign key
/// is validated by the database.
pub async fn create_engagement(
    State(state): State<AppState>,
    Json(payload): Json<CreateEngagementRequest>,
) -> ApiResult<Json<Engagement>> {
    let repo = EngagementRepository::new(state.db.pool.clone());
    let engagement = repo.create(&payload)?;
    tracing::info!(
        "created engagement {} for post {}",
        engagement.engagement_id,
        engagement.post_id
    );
    Ok(Json(engagement))
}

/// PUT /engagements/:id - Partial update of likes_count/comments_count
pub async fn update_engagement(
    State(state): State<AppState>,
    Path(engagement_id): Path<i64>,
    Json(payload): Json<UpdateEngagementRequest>,
) -> ApiResult<Json<Engagement>> {
    let repo = EngagementRepository::new(state.db.pool.clone());

    if repo.get_by_id(engagement_id)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Engagement with ID {engagement_id} not found"
        )));
    }

    repo.update(engagement_id, payload.likes_count, payload.comments_count)?;

    let engagement = repo.get_by_id(engagement_id)?.ok_or_else(|| {
        ApiError::NotFound(format!("Engagement with ID {engagement_id} not found"))
    })?;
    Ok(Json(engagement))
}

/// DELETE /engagements/:id - Delete an engagement record
pub async fn delete_engagement(
    State(state): State<AppState>,
    Path(engagement_id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = EngagementRepository::new(state.db.pool.clone());

    if repo.get_by_id(engagement_id)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Engagement with ID {engagement_id} not found"
        )));
    }

    repo.delete(engagement_id)?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "message": format!("Engagement with ID {engagement_id} has been deleted"),
    })))
}
