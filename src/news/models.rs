//! News post data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A news post. `published` starts false and is flipped by an admin; any
/// content update resets it to false so edits go back through review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPost {
    pub id: Uuid,
    pub post_title: String,
    pub category: String,
    pub news_content: String,
    pub user_id: Uuid,
    pub published: bool,
    pub created_at: String,
}

/// Create request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub post_title: String,
    pub category: String,
    pub news_content: String,
}

/// Delete request body
#[derive(Debug, Deserialize)]
pub struct DeletePostRequest {
    #[serde(rename = "_id")]
    pub id: Uuid,
}

/// Publish toggle request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPostRequest {
    pub post_id: Uuid,
}

/// Update request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub post_title: String,
    pub category: String,
    pub news_content: String,
}
