//! Token verification configuration.
//!
//! Credential issuance lives outside this system; only the shared secret
//! needed to verify access tokens is configured here.

use serde::{Deserialize, Serialize};

/// JWT verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for HS256 token verification.
    pub jwt_secret: String,
    /// Access token lifetime in seconds (used when minting test tokens).
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: i64,
}

fn default_access_ttl() -> i64 {
    3600
}
