use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Custom serde module so timestamps always cross the wire as RFC3339 strings
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.to_rfc3339();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub bio: Option<String>,
    pub followers_count: i64,
    pub following_count: i64,
    pub location: Option<String>,
    pub is_influential: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub post_id: i64,
    pub user_id: i64,
    pub media_type: String,
    pub media_url: String,
    pub caption: Option<String>,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub message: String,
    pub like_count: i64,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follower {
    pub follower_id: i64,
    pub user_id: i64,
    pub follower_user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engagement {
    pub engagement_id: i64,
    pub post_id: i64,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub video_completion_rate: f64,
}

// Request types for the API

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers_count: i64,
    #[serde(default)]
    pub following_count: i64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_influential: bool,
}

/// Partial update: unset fields keep their stored values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub user_id: i64,
    pub media_type: String,
    pub media_url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub caption: Option<String>,
}

/// Comment rows are written by the repository layer only; there is no
/// comment HTTP resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: i64,
    pub message: String,
    #[serde(default)]
    pub like_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFollowerRequest {
    pub user_id: i64,
    pub follower_user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEngagementRequest {
    pub post_id: i64,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub comments_count: i64,
    #[serde(default)]
    pub shares_count: i64,
    #[serde(default)]
    pub video_completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEngagementRequest {
    #[serde(default)]
    pub likes_count: Option<i64>,
    #[serde(default)]
    pub comments_count: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn post_timestamps_serialize_as_rfc3339() {
        let post = Post {
            post_id: 1,
            user_id: 2,
            media_type: "image".to_string(),
            media_url: "https://cdn.example.com/a.jpg".to_string(),
            caption: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["created_at"], "2024-05-01T12:30:00+00:00");

        let back: Post = serde_json::from_value(json).unwrap();
        assert_eq!(back.created_at, post.created_at);
    }

    #[test]
    fn create_user_request_defaults_optional_fields() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username": "ada"}"#).unwrap();
        assert_eq!(req.username, "ada");
        assert_eq!(req.followers_count, 0);
        assert_eq!(req.following_count, 0);
        assert!(req.bio.is_none());
        assert!(!req.is_influential);
    }

    #[test]
    fn update_requests_accept_partial_bodies() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"bio": "hi"}"#).unwrap();
        assert!(req.username.is_none());
        assert_eq!(req.bio.as_deref(), Some("hi"));

        let req: UpdateEngagementRequest =
            serde_json::from_str(r#"{"likes_count": 7}"#).unwrap();
        assert_eq!(req.likes_count, Some(7));
        assert!(req.comments_count.is_none());
    }
}
