//! JWT claims structure for access tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wardlink_entity::account::AccountRole;

/// Claims payload embedded in every access token.
///
/// The verified `(sub, role)` pair is all the link workflow trusts; no
/// credential material passes this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the account ID.
    pub sub: Uuid,
    /// Account role at the time of token issuance.
    pub role: AccountRole,
    /// Username for convenience.
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the account ID from the subject claim.
    pub fn account_id(&self) -> Uuid {
        self.sub
    }
}
