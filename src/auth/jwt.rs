//! JWT Token Handler
//! Mission: Issue and verify signed bearer tokens

use crate::auth::models::{Claims, Role};
use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;
use uuid::Uuid;

/// JWT handler for token operations; rotating the secret invalidates every
/// outstanding token.
pub struct JwtHandler {
    secret: String,
}

impl JwtHandler {
    /// Create a new JWT handler with the secret key
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Issue a token binding a user id and role; no expiry claim is set
    pub fn issue_token(&self, user_id: Uuid, role: Role) -> Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            role,
        };

        debug!("Issuing token for user {}", user_id);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign token")
    }

    /// Verify a token's signature and extract its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no exp claim
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .context("Invalid token")?;

        Ok(decoded.claims)
    }
}
