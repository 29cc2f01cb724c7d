//! Authentication Middleware
//! Mission: Guard every authenticated entry point

use crate::auth::jwt::JwtHandler;
use crate::auth::models::Role;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Header carrying the bearer token on every authenticated call.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Identity and role resolved from a verified token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

/// Auth gate that validates the `x-auth-token` header.
///
/// The gate trusts the token alone: identity existence is not re-checked
/// against the store.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get(AUTH_HEADER)
        .map(|v| v.to_str().map(|s| s.trim().to_string()))
        .transpose()
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .unwrap_or_default();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    let claims = jwt_handler
        .verify_token(&token)
        .map_err(|_| AuthError::VerificationFailed)?;

    // A token we signed always carries a well-formed id
    let id = Uuid::parse_str(&claims.sub).map_err(|e| AuthError::Internal(e.to_string()))?;

    let user = AuthUser {
        id,
        role: claims.role,
    };
    req.extensions_mut().insert(user.clone());

    let mut response = next.run(req).await;
    // Mirror the caller onto the response so the request logger can name it
    response.extensions_mut().insert(user);

    Ok(response)
}

/// Auth gate error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    VerificationFailed,
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "No authentication token, access denied".to_string(),
            ),
            AuthError::VerificationFailed => (
                StatusCode::UNAUTHORIZED,
                "Token verification failed, authorization denied".to_string(),
            ),
            AuthError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (
            status,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
