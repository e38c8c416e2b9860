//! Link request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::LinkRequestStatus;

/// A proposal from a dependent to link with a guardian.
///
/// Requests are never deleted; terminal rows remain as an audit trail.
/// At most one request per (dependent, guardian) pair may be pending at
/// any time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LinkRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The dependent who initiated the request.
    pub dependent_id: Uuid,
    /// The guardian the request is addressed to.
    pub guardian_id: Uuid,
    /// Current lifecycle state.
    pub status: LinkRequestStatus,
    /// When the request was created.
    pub requested_at: DateTime<Utc>,
    /// When the guardian decided, if the request is terminal.
    pub decided_at: Option<DateTime<Utc>>,
}

impl LinkRequest {
    /// Check whether the request is still awaiting a decision.
    pub fn is_pending(&self) -> bool {
        self.status == LinkRequestStatus::Pending
    }
}
