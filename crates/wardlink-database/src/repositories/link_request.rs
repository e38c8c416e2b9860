//! Link request repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use wardlink_core::error::AppError;
use wardlink_core::result::AppResult;
use wardlink_entity::link_request::LinkRequest;

use super::store_error;
use crate::store::LinkRequestStore;

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed link request store.
///
/// The single-pending-request invariant is enforced by a partial unique
/// index, so it holds even when two creates race. The pending-to-terminal
/// transition is guarded by a conditional `WHERE status = 'pending'`
/// update, so a racing second decision sees zero rows updated.
#[derive(Debug, Clone)]
pub struct LinkRequestRepository {
    pool: PgPool,
}

impl LinkRequestRepository {
    /// Create a new link request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRequestStore for LinkRequestRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LinkRequest>> {
        sqlx::query_as::<_, LinkRequest>("SELECT * FROM link_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find link request", e))
    }

    async fn has_pending(&self, dependent_id: Uuid, guardian_id: Uuid) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM link_requests \
             WHERE dependent_id = $1 AND guardian_id = $2 AND status = 'pending'",
        )
        .bind(dependent_id)
        .bind(guardian_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to check for pending request", e))?;
        Ok(count > 0)
    }

    async fn insert_pending(
        &self,
        dependent_id: Uuid,
        guardian_id: Uuid,
    ) -> AppResult<LinkRequest> {
        sqlx::query_as::<_, LinkRequest>(
            "INSERT INTO link_requests (dependent_id, guardian_id) \
             VALUES ($1, $2) RETURNING *",
        )
        .bind(dependent_id)
        .bind(guardian_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                    return AppError::duplicate_request(
                        "A pending link request already exists for this guardian",
                    );
                }
            }
            store_error("Failed to insert link request", e)
        })
    }

    async fn mark_accepted(&self, request_id: Uuid) -> AppResult<Option<LinkRequest>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin transaction", e))?;

        let updated = sqlx::query_as::<_, LinkRequest>(
            "UPDATE link_requests SET status = 'accepted', decided_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| store_error("Failed to accept link request", e))?;

        if let Some(request) = &updated {
            sqlx::query("UPDATE accounts SET linked_guardian_id = $1 WHERE id = $2")
                .bind(request.guardian_id)
                .bind(request.dependent_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| store_error("Failed to set guardian back-reference", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit accept transaction", e))?;

        Ok(updated)
    }

    async fn mark_rejected(&self, request_id: Uuid) -> AppResult<Option<LinkRequest>> {
        sqlx::query_as::<_, LinkRequest>(
            "UPDATE link_requests SET status = 'rejected', decided_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to reject link request", e))
    }

    async fn pending_for_guardian(&self, guardian_id: Uuid) -> AppResult<Vec<LinkRequest>> {
        sqlx::query_as::<_, LinkRequest>(
            "SELECT * FROM link_requests \
             WHERE guardian_id = $1 AND status = 'pending' \
             ORDER BY requested_at ASC",
        )
        .bind(guardian_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to list pending requests", e))
    }
}
