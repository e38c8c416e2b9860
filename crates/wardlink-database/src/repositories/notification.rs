//! Notification repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use wardlink_core::result::AppResult;
use wardlink_entity::account::AccountRole;
use wardlink_entity::notification::Notification;

use super::store_error;
use crate::store::NotificationStore;

/// PostgreSQL-backed notification ledger.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The party-id column a caller of the given role filters on.
    fn party_column(role: AccountRole) -> &'static str {
        match role {
            AccountRole::Guardian => "guardian_id",
            AccountRole::Dependent => "dependent_id",
        }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(
        &self,
        guardian_id: Uuid,
        dependent_id: Uuid,
        message: &str,
    ) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (guardian_id, dependent_id, message) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(guardian_id)
        .bind(dependent_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to insert notification", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find notification", e))
    }

    async fn unread_for(
        &self,
        account_id: Uuid,
        role: AccountRole,
    ) -> AppResult<Vec<Notification>> {
        let query = format!(
            "SELECT * FROM notifications WHERE {} = $1 AND is_read = FALSE \
             ORDER BY created_at DESC",
            Self::party_column(role)
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(account_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to list unread notifications", e))
    }

    async fn count_unread(&self, account_id: Uuid, role: AccountRole) -> AppResult<i64> {
        let query = format!(
            "SELECT COUNT(*) FROM notifications WHERE {} = $1 AND is_read = FALSE",
            Self::party_column(role)
        );
        sqlx::query_scalar(&query)
            .bind(account_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to count unread notifications", e))
    }

    async fn mark_read(&self, notification_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(notification_id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to mark notification read", e))?;
        Ok(())
    }
}
