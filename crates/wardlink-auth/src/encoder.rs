//! JWT token minting.
//!
//! Kept for tooling and tests; the production credential flow lives in the
//! external identity service.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use wardlink_core::config::AuthConfig;
use wardlink_core::error::AppError;
use wardlink_entity::account::AccountRole;

use super::claims::Claims;

/// Mints HS256 access tokens compatible with [`super::TokenDecoder`].
#[derive(Clone)]
pub struct TokenEncoder {
    encoding_key: EncodingKey,
    ttl_seconds: i64,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_seconds: config.access_token_ttl_seconds,
        }
    }

    /// Mint an access token for the given account.
    pub fn mint(
        &self,
        account_id: Uuid,
        role: AccountRole,
        username: &str,
    ) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: account_id,
            role,
            username: username.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::with_source(
                wardlink_core::ErrorKind::Internal,
                format!("Failed to mint token: {e}"),
                e,
            ))
    }
}
