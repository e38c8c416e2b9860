//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::AccountRole;

/// A registered account in the WardLink system.
///
/// `linked_guardian_id` is the single source of truth for the
/// guardian-dependent relationship: a guardian's dependents are derived by
/// querying accounts whose back-reference equals the guardian's id, never
/// from an embedded list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Display name.
    pub username: String,
    /// Phone number, unique within a role.
    pub phone_number: String,
    /// Account role.
    pub role: AccountRole,
    /// Back-reference to the linked guardian. Set only for dependents,
    /// and only by the accept path of the link workflow.
    pub linked_guardian_id: Option<Uuid>,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Check whether this account is a guardian.
    pub fn is_guardian(&self) -> bool {
        self.role == AccountRole::Guardian
    }

    /// Check whether this account is a dependent.
    pub fn is_dependent(&self) -> bool {
        self.role == AccountRole::Dependent
    }

    /// Check whether this dependent is linked to the given guardian.
    pub fn is_linked_to(&self, guardian_id: Uuid) -> bool {
        self.linked_guardian_id == Some(guardian_id)
    }
}
