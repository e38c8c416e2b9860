//! Link request ledger — owns the lifecycle of a link request.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use wardlink_core::error::AppError;
use wardlink_core::result::AppResult;
use wardlink_database::store::{AccountStore, LinkRequestStore};
use wardlink_entity::account::AccountRole;
use wardlink_entity::link_request::{LinkDecision, LinkRequest};

/// Enforces the link request invariants: at most one pending request per
/// (dependent, guardian) pair, and no transition out of a terminal state.
#[derive(Clone)]
pub struct LinkRequestLedger {
    accounts: Arc<dyn AccountStore>,
    requests: Arc<dyn LinkRequestStore>,
}

impl LinkRequestLedger {
    /// Creates a new ledger over the given stores.
    pub fn new(accounts: Arc<dyn AccountStore>, requests: Arc<dyn LinkRequestStore>) -> Self {
        Self { accounts, requests }
    }

    /// Create a new pending request from a dependent to a guardian.
    ///
    /// Both ids must resolve to accounts of the expected role; a pending
    /// request for the pair must not already exist.
    pub async fn create(&self, dependent_id: Uuid, guardian_id: Uuid) -> AppResult<LinkRequest> {
        self.expect_role(dependent_id, AccountRole::Dependent).await?;
        self.expect_role(guardian_id, AccountRole::Guardian).await?;

        if self.requests.has_pending(dependent_id, guardian_id).await? {
            return Err(AppError::duplicate_request(
                "A pending link request already exists for this guardian",
            ));
        }

        // The store re-checks under its own atomicity guard, so a racing
        // second create still fails with DuplicateRequest.
        let request = self.requests.insert_pending(dependent_id, guardian_id).await?;

        info!(
            request_id = %request.id,
            dependent_id = %dependent_id,
            guardian_id = %guardian_id,
            "Link request created"
        );
        Ok(request)
    }

    /// Apply a guardian's decision to a pending request.
    ///
    /// Accept atomically sets the request status and the dependent's
    /// guardian back-reference; reject touches the request only. A request
    /// that already left `pending` fails with `InvalidState`.
    pub async fn decide(
        &self,
        request_id: Uuid,
        decision: LinkDecision,
    ) -> AppResult<LinkRequest> {
        let updated = match decision {
            LinkDecision::Accept => self.requests.mark_accepted(request_id).await?,
            LinkDecision::Reject => self.requests.mark_rejected(request_id).await?,
        };

        match updated {
            Some(request) => {
                info!(
                    request_id = %request.id,
                    status = %request.status,
                    "Link request decided"
                );
                Ok(request)
            }
            // Zero rows transitioned: distinguish a missing request from
            // one already in a terminal state.
            None => match self.requests.find_by_id(request_id).await? {
                Some(request) => Err(AppError::invalid_state(format!(
                    "Link request is already {}",
                    request.status
                ))),
                None => Err(AppError::not_found("Link request not found")),
            },
        }
    }

    /// Look up a request by id regardless of its state.
    pub async fn find(&self, request_id: Uuid) -> AppResult<Option<LinkRequest>> {
        self.requests.find_by_id(request_id).await
    }

    /// Pending requests addressed to the guardian, oldest first.
    pub async fn pending_for_guardian(&self, guardian_id: Uuid) -> AppResult<Vec<LinkRequest>> {
        self.requests.pending_for_guardian(guardian_id).await
    }

    async fn expect_role(&self, account_id: Uuid, role: AccountRole) -> AppResult<()> {
        match self.accounts.resolve_by_id(account_id).await? {
            Some(account) if account.role == role => Ok(()),
            _ => Err(AppError::not_found(format!("No {role} account with that id"))),
        }
    }
}
