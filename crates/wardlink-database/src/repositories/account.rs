//! Account repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use wardlink_core::result::AppResult;
use wardlink_entity::account::{Account, AccountRole};

use super::store_error;
use crate::store::AccountStore;

/// PostgreSQL-backed account store.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn resolve_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to resolve account by id", e))
    }

    async fn resolve_by_phone(
        &self,
        phone: &str,
        role: AccountRole,
    ) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE phone_number = $1 AND role = $2",
        )
        .bind(phone)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to resolve account by phone", e))
    }

    async fn set_linked_guardian(&self, dependent_id: Uuid, guardian_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE accounts SET linked_guardian_id = $1 WHERE id = $2")
            .bind(guardian_id)
            .bind(dependent_id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to set linked guardian", e))?;
        Ok(())
    }

    async fn dependents_of(&self, guardian_id: Uuid) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE linked_guardian_id = $1 ORDER BY username",
        )
        .bind(guardian_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to list dependents", e))
    }
}
