//! Session Check
//! Mission: Resolve an optional session without rejecting the call

use crate::auth::jwt::JwtHandler;
use crate::auth::middleware::AUTH_HEADER;
use crate::auth::models::User;
use crate::auth::user_store::UserStore;
use axum::http::HeaderMap;
use tracing::warn;
use uuid::Uuid;

/// Why a request carries no usable session
#[derive(Debug)]
pub enum SessionError {
    /// Missing token, bad signature, or unknown identity
    NotLoggedIn,
    /// Store fault; must not masquerade as a logged-out session
    TransientFailure(String),
}

/// Resolve the session presented in `x-auth-token`, if any. Unlike the auth
/// gate, this confirms the identity still exists in the store.
pub fn current_session(
    headers: &HeaderMap,
    jwt_handler: &JwtHandler,
    user_store: &UserStore,
) -> Result<User, SessionError> {
    let token = headers
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    if token.is_empty() {
        return Err(SessionError::NotLoggedIn);
    }

    let claims = jwt_handler
        .verify_token(token)
        .map_err(|_| SessionError::NotLoggedIn)?;

    let id = Uuid::parse_str(&claims.sub).map_err(|_| SessionError::NotLoggedIn)?;

    match user_store.find_by_id(&id) {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(SessionError::NotLoggedIn),
        Err(e) => {
            warn!("Session lookup failed: {e:#}");
            Err(SessionError::TransientFailure(e.to_string()))
        }
    }
}
