//! Link workflow orchestrator.
//!
//! Validates preconditions, mutates the ledger and account store, appends
//! to the notification ledger, and invokes the dispatcher. The ledger
//! write must succeed or the whole action fails; the real-time push is
//! fire-and-forget.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use wardlink_core::error::AppError;
use wardlink_core::result::AppResult;
use wardlink_database::store::AccountStore;
use wardlink_entity::account::{Account, AccountRole};
use wardlink_entity::link_request::{LinkDecision, LinkRequest};
use wardlink_realtime::Dispatcher;

use crate::context::RequestContext;
use crate::notification::NotificationService;

use super::ledger::LinkRequestLedger;

/// Orchestrates the link-request handshake between a dependent and a
/// guardian.
#[derive(Clone)]
pub struct LinkService {
    accounts: Arc<dyn AccountStore>,
    ledger: LinkRequestLedger,
    notifications: Arc<NotificationService>,
    dispatcher: Arc<Dispatcher>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        ledger: LinkRequestLedger,
        notifications: Arc<NotificationService>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            accounts,
            ledger,
            notifications,
            dispatcher,
        }
    }

    /// A dependent requests a link with the guardian owning the given
    /// phone number.
    ///
    /// Appends and dispatches a notification addressed to the guardian.
    /// Delivery outcome is not part of the return contract.
    pub async fn request_link(
        &self,
        ctx: &RequestContext,
        guardian_phone_number: &str,
    ) -> AppResult<LinkRequest> {
        if !ctx.is_dependent() {
            return Err(AppError::not_authorized(
                "Only dependents may request a link",
            ));
        }

        let guardian = self
            .accounts
            .resolve_by_phone(guardian_phone_number, AccountRole::Guardian)
            .await?
            .ok_or_else(|| AppError::not_found("No guardian with that phone number"))?;

        let request = self.ledger.create(ctx.account_id, guardian.id).await?;

        let message = format!("{} has requested to link with you.", ctx.username);
        let notification = self
            .notifications
            .append(guardian.id, ctx.account_id, &message)
            .await?;
        self.dispatcher.deliver(&notification, guardian.id);

        info!(
            request_id = %request.id,
            dependent_id = %ctx.account_id,
            guardian_id = %guardian.id,
            "Link requested"
        );
        Ok(request)
    }

    /// The guardian named on the request accepts or rejects it.
    ///
    /// On accept, a notification addressed to the dependent is appended
    /// and dispatched. On reject, no notification is generated; rejection
    /// stays silent toward the dependent.
    pub async fn decide_request(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        decision: LinkDecision,
    ) -> AppResult<LinkRequest> {
        let request = self
            .ledger
            .find(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link request not found"))?;

        if !ctx.is_guardian() || ctx.account_id != request.guardian_id {
            return Err(AppError::not_authorized(
                "Only the guardian named on the request may decide it",
            ));
        }

        let updated = self.ledger.decide(request_id, decision).await?;

        if decision == LinkDecision::Accept {
            let message = format!("{} accepted your link request.", ctx.username);
            let notification = self
                .notifications
                .append(ctx.account_id, updated.dependent_id, &message)
                .await?;
            self.dispatcher.deliver(&notification, updated.dependent_id);
        }

        Ok(updated)
    }

    /// Pending requests addressed to the calling guardian, oldest first.
    pub async fn pending_requests(&self, ctx: &RequestContext) -> AppResult<Vec<LinkRequest>> {
        if !ctx.is_guardian() {
            return Err(AppError::not_authorized(
                "Only guardians have a pending request queue",
            ));
        }
        self.ledger.pending_for_guardian(ctx.account_id).await
    }

    /// The calling guardian's dependents, derived from the back-reference.
    pub async fn dependents(&self, ctx: &RequestContext) -> AppResult<Vec<Account>> {
        if !ctx.is_guardian() {
            return Err(AppError::not_authorized("Only guardians have dependents"));
        }
        self.accounts.dependents_of(ctx.account_id).await
    }
}
