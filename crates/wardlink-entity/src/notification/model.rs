//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An append-only record of a link lifecycle event.
///
/// The record stores both parties so either side's dashboard query can
/// filter on its own id; the addressee is derived from context (creation
/// events address the guardian, decision events address the dependent).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The guardian party of the event.
    pub guardian_id: Uuid,
    /// The dependent party of the event.
    pub dependent_id: Uuid,
    /// Human-readable event text.
    pub message: String,
    /// Whether the addressee has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check whether the given account is one of the two stored parties.
    pub fn involves(&self, account_id: Uuid) -> bool {
        self.guardian_id == account_id || self.dependent_id == account_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involves_both_parties_only() {
        let n = Notification {
            id: Uuid::new_v4(),
            guardian_id: Uuid::new_v4(),
            dependent_id: Uuid::new_v4(),
            message: "hello".to_string(),
            is_read: false,
            created_at: Utc::now(),
        };
        assert!(n.involves(n.guardian_id));
        assert!(n.involves(n.dependent_id));
        assert!(!n.involves(Uuid::new_v4()));
    }
}
