//! News Post API Endpoints
//! Mission: CRUD and publishing workflow for news posts

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::api::Ack;
use crate::auth::middleware::AuthUser;
use crate::auth::models::Role;
use crate::auth::policy;
use crate::news::models::{
    CreatePostRequest, DeletePostRequest, NewsPost, PublishPostRequest, UpdatePostRequest,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub success: bool,
    pub posts: Vec<NewsPost>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub success: bool,
    pub post: NewsPost,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub success: bool,
    pub message: String,
    pub published: bool,
}

/// Create a post - POST /create-news-post (gated)
///
/// The author is taken from the call context, never from the body.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<Ack>, ApiError> {
    if payload.post_title.trim().is_empty()
        || payload.category.trim().is_empty()
        || payload.news_content.trim().is_empty()
    {
        return Err(ApiError::ValidationFailed(
            "One or more required fields has no value",
        ));
    }

    if state
        .post_store
        .find_by_title(&payload.post_title)
        .map_err(ApiError::internal)?
        .is_some()
    {
        return Err(ApiError::DuplicateTitle);
    }

    state
        .post_store
        .create_post(
            &payload.post_title,
            &payload.category,
            &payload.news_content,
            &auth_user.id,
        )
        .map_err(ApiError::internal)?;

    Ok(Json(Ack {
        success: true,
        message: "Post created successfully".to_string(),
    }))
}

/// List posts - POST /news-posts (gated)
///
/// Admins see every post; users see only their own.
pub async fn list_posts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<PostsResponse>, ApiError> {
    let posts = match auth_user.role {
        Role::Admin => state.post_store.list_all(),
        Role::User => state.post_store.list_by_user(&auth_user.id),
    }
    .map_err(ApiError::internal)?;

    Ok(Json(PostsResponse {
        success: true,
        posts,
        message: None,
    }))
}

/// Delete a post - POST /delete-post (gated)
pub async fn delete_post(
    State(state): State<AppState>,
    Json(payload): Json<DeletePostRequest>,
) -> Result<Json<Ack>, ApiError> {
    let deleted = state
        .post_store
        .delete_post(&payload.id)
        .map_err(ApiError::internal)?;
    if !deleted {
        return Err(ApiError::NotFound("Deletion failed"));
    }

    Ok(Json(Ack {
        success: true,
        message: "The news post was deleted successfully".to_string(),
    }))
}

/// Toggle a post's published flag - POST /publish-post (gated, admin only)
pub async fn publish_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<PublishPostRequest>,
) -> Result<Json<PublishResponse>, ApiError> {
    if !policy::is_admin(&state.user_store, &auth_user.id).map_err(ApiError::internal)? {
        return Err(ApiError::AccessDenied);
    }

    let published = state
        .post_store
        .toggle_published(&payload.post_id)
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Couldn't publish post"))?;

    Ok(Json(PublishResponse {
        success: true,
        message: "News post successfully updated".to_string(),
        published,
    }))
}

/// Fetch a single post - POST /fetch-post/:id (public)
pub async fn fetch_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state
        .post_store
        .find_by_id(&post_id)
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Post not found"))?;

    Ok(Json(PostResponse {
        success: true,
        post,
    }))
}

/// Rewrite a post - PUT /update-news-post (gated)
///
/// The post is reowned to the caller and unpublished until an admin
/// republishes it.
pub async fn update_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<Ack>, ApiError> {
    let updated = state
        .post_store
        .update_post(
            &payload.id,
            &payload.post_title,
            &payload.category,
            &payload.news_content,
            &auth_user.id,
        )
        .map_err(ApiError::internal)?;
    if !updated {
        return Err(ApiError::NotFound("Failed to update post"));
    }

    Ok(Json(Ack {
        success: true,
        message: "Successfully updated post".to_string(),
    }))
}

/// List published posts - GET /all-news-posts (public)
pub async fn all_published_posts(
    State(state): State<AppState>,
) -> Result<Json<PostsResponse>, ApiError> {
    let posts = state
        .post_store
        .list_published()
        .map_err(ApiError::internal)?;

    Ok(Json(PostsResponse {
        success: true,
        posts,
        message: None,
    }))
}
