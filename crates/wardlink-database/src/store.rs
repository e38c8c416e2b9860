//! Store contracts consumed by the link workflow.
//!
//! These traits are the fixed contract against the external collaborators:
//! the account/identity store and the two ledgers. The workflow service
//! only ever sees `Arc<dyn ...>`, so the PostgreSQL and in-memory
//! implementations are interchangeable.

use async_trait::async_trait;
use uuid::Uuid;

use wardlink_core::result::AppResult;
use wardlink_entity::account::{Account, AccountRole};
use wardlink_entity::link_request::LinkRequest;
use wardlink_entity::notification::Notification;

/// Identity lookup and the single mutation the accept path is allowed to
/// perform on it.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Resolve an account by id.
    async fn resolve_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Resolve an account by phone number and role.
    async fn resolve_by_phone(&self, phone: &str, role: AccountRole)
    -> AppResult<Option<Account>>;

    /// Set the dependent's guardian back-reference.
    ///
    /// Only the link workflow's accept path may call this; every other
    /// path is read-only with respect to the field.
    async fn set_linked_guardian(&self, dependent_id: Uuid, guardian_id: Uuid) -> AppResult<()>;

    /// Derived reverse view: all dependents whose back-reference equals
    /// the given guardian id.
    async fn dependents_of(&self, guardian_id: Uuid) -> AppResult<Vec<Account>>;
}

/// Persistence contract for the link request lifecycle.
#[async_trait]
pub trait LinkRequestStore: Send + Sync + 'static {
    /// Find a request by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LinkRequest>>;

    /// Whether a pending request exists for the pair.
    async fn has_pending(&self, dependent_id: Uuid, guardian_id: Uuid) -> AppResult<bool>;

    /// Insert a new pending request.
    ///
    /// Fails with `DuplicateRequest` if a pending request for the pair
    /// already exists, including under concurrent inserts.
    async fn insert_pending(&self, dependent_id: Uuid, guardian_id: Uuid)
    -> AppResult<LinkRequest>;

    /// Transition a pending request to `accepted` and set the dependent's
    /// guardian back-reference as one atomic unit.
    ///
    /// Returns `None` if the request exists but is no longer pending, so a
    /// racing second decision observes the terminal state instead of
    /// overwriting it.
    async fn mark_accepted(&self, request_id: Uuid) -> AppResult<Option<LinkRequest>>;

    /// Transition a pending request to `rejected`. No account mutation.
    ///
    /// Returns `None` if the request exists but is no longer pending.
    async fn mark_rejected(&self, request_id: Uuid) -> AppResult<Option<LinkRequest>>;

    /// Pending requests addressed to the guardian, oldest first.
    async fn pending_for_guardian(&self, guardian_id: Uuid) -> AppResult<Vec<LinkRequest>>;
}

/// Persistence contract for the append-only notification ledger.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Append a new unread notification naming both parties.
    async fn insert(
        &self,
        guardian_id: Uuid,
        dependent_id: Uuid,
        message: &str,
    ) -> AppResult<Notification>;

    /// Find a notification by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// Unread notifications whose party-id column for `role` matches
    /// `account_id`, most recent first.
    async fn unread_for(&self, account_id: Uuid, role: AccountRole)
    -> AppResult<Vec<Notification>>;

    /// Count of unread notifications for the account.
    async fn count_unread(&self, account_id: Uuid, role: AccountRole) -> AppResult<i64>;

    /// Set `is_read = true`. Idempotent.
    async fn mark_read(&self, notification_id: Uuid) -> AppResult<()>;
}
