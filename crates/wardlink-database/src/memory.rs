//! In-memory store for tests and single-node development.
//!
//! Implements all three store contracts over one mutex-protected state so
//! the accept transition can mutate the request and the account
//! back-reference as a single atomic unit, matching the transactional
//! guarantee of the PostgreSQL implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use wardlink_core::error::AppError;
use wardlink_core::result::AppResult;
use wardlink_entity::account::{Account, AccountRole};
use wardlink_entity::link_request::{LinkRequest, LinkRequestStatus};
use wardlink_entity::notification::Notification;

use crate::store::{AccountStore, LinkRequestStore, NotificationStore};

/// Internal state behind the mutex.
#[derive(Debug, Default)]
struct InnerState {
    accounts: HashMap<Uuid, Account>,
    requests: HashMap<Uuid, LinkRequest>,
    notifications: HashMap<Uuid, Notification>,
}

/// In-memory store using a Tokio mutex for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account directly, standing in for the external
    /// registration flow. Returns the stored account.
    pub async fn seed_account(
        &self,
        username: &str,
        phone_number: &str,
        role: AccountRole,
    ) -> Account {
        let account = Account {
            id: Uuid::new_v4(),
            username: username.to_string(),
            phone_number: phone_number.to_string(),
            role,
            linked_guardian_id: None,
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().await;
        state.accounts.insert(account.id, account.clone());
        account
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn resolve_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let state = self.state.lock().await;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn resolve_by_phone(
        &self,
        phone: &str,
        role: AccountRole,
    ) -> AppResult<Option<Account>> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .values()
            .find(|a| a.phone_number == phone && a.role == role)
            .cloned())
    }

    async fn set_linked_guardian(&self, dependent_id: Uuid, guardian_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        match state.accounts.get_mut(&dependent_id) {
            Some(account) => {
                account.linked_guardian_id = Some(guardian_id);
                Ok(())
            }
            None => Err(AppError::not_found("Dependent account not found")),
        }
    }

    async fn dependents_of(&self, guardian_id: Uuid) -> AppResult<Vec<Account>> {
        let state = self.state.lock().await;
        let mut dependents: Vec<Account> = state
            .accounts
            .values()
            .filter(|a| a.linked_guardian_id == Some(guardian_id))
            .cloned()
            .collect();
        dependents.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(dependents)
    }
}

#[async_trait]
impl LinkRequestStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LinkRequest>> {
        let state = self.state.lock().await;
        Ok(state.requests.get(&id).cloned())
    }

    async fn has_pending(&self, dependent_id: Uuid, guardian_id: Uuid) -> AppResult<bool> {
        let state = self.state.lock().await;
        Ok(state.requests.values().any(|r| {
            r.dependent_id == dependent_id && r.guardian_id == guardian_id && r.is_pending()
        }))
    }

    async fn insert_pending(
        &self,
        dependent_id: Uuid,
        guardian_id: Uuid,
    ) -> AppResult<LinkRequest> {
        let mut state = self.state.lock().await;
        let duplicate = state.requests.values().any(|r| {
            r.dependent_id == dependent_id && r.guardian_id == guardian_id && r.is_pending()
        });
        if duplicate {
            return Err(AppError::duplicate_request(
                "A pending link request already exists for this guardian",
            ));
        }
        let request = LinkRequest {
            id: Uuid::new_v4(),
            dependent_id,
            guardian_id,
            status: LinkRequestStatus::Pending,
            requested_at: Utc::now(),
            decided_at: None,
        };
        state.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn mark_accepted(&self, request_id: Uuid) -> AppResult<Option<LinkRequest>> {
        let mut state = self.state.lock().await;
        let (dependent_id, guardian_id) = match state.requests.get_mut(&request_id) {
            Some(request) if request.is_pending() => {
                request.status = LinkRequestStatus::Accepted;
                request.decided_at = Some(Utc::now());
                (request.dependent_id, request.guardian_id)
            }
            _ => return Ok(None),
        };
        // Same lock guards both maps, so the status flip and the
        // back-reference are observable together.
        if let Some(account) = state.accounts.get_mut(&dependent_id) {
            account.linked_guardian_id = Some(guardian_id);
        }
        Ok(state.requests.get(&request_id).cloned())
    }

    async fn mark_rejected(&self, request_id: Uuid) -> AppResult<Option<LinkRequest>> {
        let mut state = self.state.lock().await;
        match state.requests.get_mut(&request_id) {
            Some(request) if request.is_pending() => {
                request.status = LinkRequestStatus::Rejected;
                request.decided_at = Some(Utc::now());
                Ok(Some(request.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn pending_for_guardian(&self, guardian_id: Uuid) -> AppResult<Vec<LinkRequest>> {
        let state = self.state.lock().await;
        let mut pending: Vec<LinkRequest> = state
            .requests
            .values()
            .filter(|r| r.guardian_id == guardian_id && r.is_pending())
            .cloned()
            .collect();
        pending.sort_by_key(|r| r.requested_at);
        Ok(pending)
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn insert(
        &self,
        guardian_id: Uuid,
        dependent_id: Uuid,
        message: &str,
    ) -> AppResult<Notification> {
        let mut state = self.state.lock().await;
        let notification = Notification {
            id: Uuid::new_v4(),
            guardian_id,
            dependent_id,
            message: message.to_string(),
            is_read: false,
            created_at: Utc::now(),
        };
        state
            .notifications
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let state = self.state.lock().await;
        Ok(state.notifications.get(&id).cloned())
    }

    async fn unread_for(
        &self,
        account_id: Uuid,
        role: AccountRole,
    ) -> AppResult<Vec<Notification>> {
        let state = self.state.lock().await;
        let mut unread: Vec<Notification> = state
            .notifications
            .values()
            .filter(|n| {
                !n.is_read
                    && match role {
                        AccountRole::Guardian => n.guardian_id == account_id,
                        AccountRole::Dependent => n.dependent_id == account_id,
                    }
            })
            .cloned()
            .collect();
        unread.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(unread)
    }

    async fn count_unread(&self, account_id: Uuid, role: AccountRole) -> AppResult<i64> {
        Ok(self.unread_for(account_id, role).await?.len() as i64)
    }

    async fn mark_read(&self, notification_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if let Some(notification) = state.notifications.get_mut(&notification_id) {
            notification.is_read = true;
        }
        Ok(())
    }
}
