//! Authentication API Endpoints
//! Mission: Login, registration, and user record management

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::api::Ack;
use crate::auth::middleware::AuthUser;
use crate::auth::models::{
    LoginRequest, LoginResponse, ProfileUpdateRequest, RegisterRequest, Role,
    SessionCheckResponse, User,
};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::policy;
use crate::auth::session::{current_session, SessionError};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

/// Login endpoint - POST /login
///
/// Idempotent: a request that already carries a valid session short-circuits
/// to success without re-checking credentials (and without minting a fresh
/// token).
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match current_session(&headers, &state.jwt_handler, &state.user_store) {
        Ok(user) => {
            info!("🔐 Login request from already-authenticated user {}", user.id);
            return Ok(Json(LoginResponse {
                status: 200,
                success: true,
                message: "Login successful".to_string(),
                token: None,
                user: None,
            }));
        }
        Err(SessionError::TransientFailure(e)) => {
            return Err(ApiError::Internal(anyhow::anyhow!(e)))
        }
        Err(SessionError::NotLoggedIn) => {}
    }

    let user = state
        .user_store
        .find_by_email(&payload.email)
        .map_err(ApiError::internal)?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid =
        verify_password(&payload.password, &user.password_hash).map_err(ApiError::internal)?;
    if !valid {
        warn!("❌ Failed login attempt: {}", payload.email);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .jwt_handler
        .issue_token(user.id, user.role.clone())
        .map_err(ApiError::internal)?;

    info!("✅ Login successful: {} ({})", user.email, user.role.as_str());

    Ok(Json(LoginResponse {
        status: 200,
        success: true,
        message: "Login successful".to_string(),
        token: Some(token),
        user: Some(user),
    }))
}

/// Registration endpoint - POST /register (gated)
///
/// The requested role is taken as-is, so any authenticated caller can mint an
/// admin account. A hardening pass would force Role::User here.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<Ack>, ApiError> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.trim().is_empty()
        || payload.role.trim().is_empty()
    {
        return Err(ApiError::ValidationFailed(
            "One or more of the fields is not present",
        ));
    }

    let role = Role::from_str(&payload.role)
        .ok_or(ApiError::ValidationFailed("Role must be admin or user"))?;

    if state
        .user_store
        .find_by_email(&payload.email)
        .map_err(ApiError::internal)?
        .is_some()
    {
        return Err(ApiError::DuplicateEmail);
    }

    let password_hash = hash_password(&payload.password).map_err(ApiError::internal)?;

    state
        .user_store
        .create_user(&payload.name, &payload.email, &password_hash, role)
        .map_err(ApiError::internal)?;

    // No auto-login: the caller logs in as a separate step.
    Ok(Json(Ack {
        success: true,
        message: "Account created successfully".to_string(),
    }))
}

/// Session probe - POST /users/token-is-valid (public)
pub async fn token_is_valid(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<SessionCheckResponse>), ApiError> {
    match current_session(&headers, &state.jwt_handler, &state.user_store) {
        Ok(user) => Ok((
            StatusCode::OK,
            Json(SessionCheckResponse {
                user: Some(user),
                success: true,
            }),
        )),
        Err(SessionError::NotLoggedIn) => Ok((
            StatusCode::BAD_REQUEST,
            Json(SessionCheckResponse {
                user: None,
                success: false,
            }),
        )),
        Err(SessionError::TransientFailure(e)) => Err(ApiError::Internal(anyhow::anyhow!(e))),
    }
}

/// List every user record - GET /fetch-users (gated)
pub async fn fetch_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    let users = state.user_store.list_users().map_err(ApiError::internal)?;

    Ok(Json(UsersResponse {
        success: true,
        users,
    }))
}

/// Fetch the caller's own record - GET /fetch-user (gated)
pub async fn fetch_own_record(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_store
        .find_by_id(&auth_user.id)
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Failed to fetch record"))?;

    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// Fetch a user record by id - GET /fetch-user/:user_id (gated)
pub async fn fetch_user_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_store
        .find_by_id(&user_id)
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Failed to fetch record"))?;

    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// Update a user record - POST /update-user-record (gated)
///
/// Permitted for the record's owner or any admin; the store keeps blank
/// fields and unrecognized roles unchanged.
pub async fn update_user_record(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<Ack>, ApiError> {
    if !policy::owns_or_admin(&auth_user.role, &auth_user.id, &payload.user_id) {
        return Err(ApiError::AccessDenied);
    }

    state
        .user_store
        .update_profile(
            &payload.user_id,
            &payload.name,
            &payload.email,
            &payload.role,
            &payload.password,
        )
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Failed to update record"))?;

    Ok(Json(Ack {
        success: true,
        message: "The user's profile has been updated".to_string(),
    }))
}

/// Delete a user record - DELETE /delete-user/:user_id (gated, admin only)
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    if !policy::is_admin(&state.user_store, &auth_user.id).map_err(ApiError::internal)? {
        return Err(ApiError::AccessDenied);
    }

    let deleted = state
        .user_store
        .delete_user(&user_id)
        .map_err(ApiError::internal)?;
    if !deleted {
        return Err(ApiError::NotFound("Failed to delete user"));
    }

    Ok(Json(Ack {
        success: true,
        message: "User's record deleted".to_string(),
    }))
}
