pub mod engagements;
pub mod error;
pub mod followers;
pub mod posts;
pub mod users;

pub use error::{ApiError, ApiResult};

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

/// Build the application router. Kept separate from `main` so integration
/// tests can drive the full stack without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User routes
        .route("/users", get(users::get_users))
        .route("/users", post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id", put(users::update_user))
        .route("/users/:id", delete(users::delete_user))
        // Post routes
        .route("/posts", get(posts::get_posts))
        .route("/posts", post(posts::create_post))
        .route("/posts/:id", get(posts::get_post))
        .route("/posts/:id", put(posts::update_post))
        .route("/posts/:id", delete(posts::delete_post))
        // Engagement routes
        .route("/engagements", get(engagements::get_engagements))
        .route("/engagements", post(engagements::create_engagement))
        .route("/engagements/:id", get(engagements::get_engagement))
        .route("/engagements/:id", put(engagements::update_engagement))
        .route("/engagements/:id", delete(engagements::delete_engagement))
        // Follower routes
        .route("/followers", get(followers::get_followers))
        .route("/followers", post(followers::create_follower))
        .route("/followers/:id", get(followers::get_follower))
        .route("/followers/:id", delete(followers::delete_follower))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
