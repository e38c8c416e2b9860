//! Request context carrying the verified account identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wardlink_entity::account::AccountRole;

/// Context for the current authenticated request.
///
/// Built from the verified token claims by the transport layer and passed
/// into service methods; the services trust this pair unconditionally and
/// perform no credential checks of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account's ID.
    pub account_id: Uuid,
    /// The account's role at the time the token was issued.
    pub role: AccountRole,
    /// The username (convenience field from the claims).
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(account_id: Uuid, role: AccountRole, username: String) -> Self {
        Self {
            account_id,
            role,
            username,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current account is a guardian.
    pub fn is_guardian(&self) -> bool {
        self.role == AccountRole::Guardian
    }

    /// Returns whether the current account is a dependent.
    pub fn is_dependent(&self) -> bool {
        self.role == AccountRole::Dependent
    }
}
