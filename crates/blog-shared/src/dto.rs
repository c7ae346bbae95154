//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/posts` and `PUT /api/posts/{id}`.
///
/// Every field is optional at the wire level so that missing fields are
/// reported as validation errors instead of parse errors. A `null` or absent
/// `tags` leaves the post's tags alone on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostListQuery {
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

/// A post with its tags, as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub message: String,
    pub post: PostResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListEnvelope {
    pub message: String,
    pub posts: Vec<PostResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message: String,
}

/// The authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_distinguishes_absent_and_empty_tags() {
        let absent: PostPayload = serde_json::from_str(r#"{"title":"t","content":"c"}"#).unwrap();
        assert!(absent.tags.is_none());

        let empty: PostPayload =
            serde_json::from_str(r#"{"title":"t","content":"c","tags":[]}"#).unwrap();
        assert_eq!(empty.tags, Some(vec![]));

        let null: PostPayload =
            serde_json::from_str(r#"{"title":"t","content":"c","tags":null}"#).unwrap();
        assert!(null.tags.is_none());
    }

    #[test]
    fn test_payload_tolerates_missing_fields() {
        let payload: PostPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.title.is_none());
        assert!(payload.content.is_none());
    }
}
