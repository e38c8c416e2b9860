//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wardlink_entity::account::{Account, AccountRole};
use wardlink_entity::link_request::{LinkRequest, LinkRequestStatus};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Link request summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRequestResponse {
    /// Request ID.
    pub id: Uuid,
    /// Requesting dependent.
    pub dependent_id: Uuid,
    /// Addressed guardian.
    pub guardian_id: Uuid,
    /// Lifecycle status.
    pub status: LinkRequestStatus,
    /// When the request was created.
    pub requested_at: DateTime<Utc>,
    /// When the guardian decided it, if decided.
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<LinkRequest> for LinkRequestResponse {
    fn from(request: LinkRequest) -> Self {
        Self {
            id: request.id,
            dependent_id: request.dependent_id,
            guardian_id: request.guardian_id,
            status: request.status,
            requested_at: request.requested_at,
            decided_at: request.decided_at,
        }
    }
}

/// Account summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Phone number.
    pub phone_number: String,
    /// Role.
    pub role: AccountRole,
    /// Linked guardian, for linked dependents.
    pub linked_guardian_id: Option<Uuid>,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            phone_number: account.phone_number,
            role: account.role,
            linked_guardian_id: account.linked_guardian_id,
            created_at: account.created_at,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count value.
    pub count: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
