//! Append-only notification ledger operations.

use std::sync::Arc;

use uuid::Uuid;

use wardlink_core::error::AppError;
use wardlink_core::result::AppResult;
use wardlink_database::store::NotificationStore;
use wardlink_entity::notification::Notification;

use crate::context::RequestContext;

/// Manages the notification ledger: appends, dashboard reads, mark-read.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Append an unread notification naming both parties of the event.
    pub async fn append(
        &self,
        guardian_id: Uuid,
        dependent_id: Uuid,
        message: &str,
    ) -> AppResult<Notification> {
        if message.trim().is_empty() {
            return Err(AppError::validation("Notification message must not be empty"));
        }
        self.store.insert(guardian_id, dependent_id, message).await
    }

    /// Unread notifications for the calling account, most recent first.
    pub async fn unread(&self, ctx: &RequestContext) -> AppResult<Vec<Notification>> {
        self.store.unread_for(ctx.account_id, ctx.role).await
    }

    /// Count of unread notifications for the calling account.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.store.count_unread(ctx.account_id, ctx.role).await
    }

    /// Mark a notification read on behalf of the calling account.
    ///
    /// Only one of the two stored party ids may do so; marking an
    /// already-read notification is a no-op, not an error.
    pub async fn mark_read(&self, ctx: &RequestContext, notification_id: Uuid) -> AppResult<()> {
        let notification = self
            .store
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if !notification.involves(ctx.account_id) {
            return Err(AppError::not_authorized(
                "Notification does not belong to this account",
            ));
        }

        self.store.mark_read(notification_id).await
    }
}
