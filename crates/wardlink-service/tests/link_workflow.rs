//! Workflow tests for the link-request handshake and notification fan-out,
//! run against the in-memory store.

use std::sync::Arc;

use tokio::sync::mpsc;

use wardlink_database::store::{AccountStore, LinkRequestStore, NotificationStore};
use wardlink_database::MemoryStore;
use wardlink_entity::account::{Account, AccountRole};
use wardlink_entity::link_request::{LinkDecision, LinkRequestStatus};
use wardlink_realtime::{ChannelHandle, Dispatcher, OutboundEvent, PresenceRegistry};
use wardlink_service::link::{LinkRequestLedger, LinkService};
use wardlink_service::notification::NotificationService;
use wardlink_service::RequestContext;

use wardlink_core::error::ErrorKind;

struct Harness {
    store: MemoryStore,
    registry: Arc<PresenceRegistry>,
    notifications: Arc<NotificationService>,
    links: LinkService,
}

impl Harness {
    fn new() -> Self {
        let store = MemoryStore::new();
        let accounts: Arc<dyn AccountStore> = Arc::new(store.clone());
        let requests: Arc<dyn LinkRequestStore> = Arc::new(store.clone());
        let notif_store: Arc<dyn NotificationStore> = Arc::new(store.clone());

        let registry = Arc::new(PresenceRegistry::new());
        let dispatcher = Arc::new(Dispatcher::new(registry.clone()));
        let notifications = Arc::new(NotificationService::new(notif_store));
        let ledger = LinkRequestLedger::new(accounts.clone(), requests);
        let links = LinkService::new(accounts, ledger, notifications.clone(), dispatcher);

        Self {
            store,
            registry,
            notifications,
            links,
        }
    }

    async fn guardian(&self, name: &str, phone: &str) -> (Account, RequestContext) {
        let account = self
            .store
            .seed_account(name, phone, AccountRole::Guardian)
            .await;
        let ctx = RequestContext::new(account.id, account.role, account.username.clone());
        (account, ctx)
    }

    async fn dependent(&self, name: &str, phone: &str) -> (Account, RequestContext) {
        let account = self
            .store
            .seed_account(name, phone, AccountRole::Dependent)
            .await;
        let ctx = RequestContext::new(account.id, account.role, account.username.clone());
        (account, ctx)
    }

    /// Open a live channel for the account and return the receiving half.
    fn connect(&self, account_id: uuid::Uuid) -> mpsc::Receiver<OutboundEvent> {
        let (tx, rx) = mpsc::channel(16);
        self.registry
            .register(Arc::new(ChannelHandle::new(account_id, tx)));
        rx
    }
}

#[tokio::test]
async fn duplicate_request_is_suppressed() {
    let h = Harness::new();
    let (guardian, guardian_ctx) = h.guardian("mom", "555-9").await;
    let (_, dep_ctx) = h.dependent("kid", "555-1").await;

    let first = h.links.request_link(&dep_ctx, "555-9").await.unwrap();
    assert_eq!(first.status, LinkRequestStatus::Pending);
    assert_eq!(first.guardian_id, guardian.id);

    let err = h.links.request_link(&dep_ctx, "555-9").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateRequest);

    let pending = h.links.pending_requests(&guardian_ctx).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, first.id);
}

#[tokio::test]
async fn unknown_guardian_phone_is_not_found() {
    let h = Harness::new();
    let (_, dep_ctx) = h.dependent("kid", "555-1").await;

    let err = h.links.request_link(&dep_ctx, "555-0").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn guardians_may_not_request_links() {
    let h = Harness::new();
    let (_, guardian_ctx) = h.guardian("mom", "555-9").await;
    h.guardian("dad", "555-8").await;

    let err = h.links.request_link(&guardian_ctx, "555-8").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotAuthorized);
}

#[tokio::test]
async fn accept_links_dependent_and_notifies() {
    let h = Harness::new();
    let (guardian, guardian_ctx) = h.guardian("mom", "555-9").await;
    let (dependent, dep_ctx) = h.dependent("kid", "555-1").await;

    let mut dep_rx = h.connect(dependent.id);

    let request = h.links.request_link(&dep_ctx, "555-9").await.unwrap();
    let updated = h
        .links
        .decide_request(&guardian_ctx, request.id, LinkDecision::Accept)
        .await
        .unwrap();
    assert_eq!(updated.status, LinkRequestStatus::Accepted);

    // Status and back-reference are observable together.
    let dep = h.store.resolve_by_id(dependent.id).await.unwrap().unwrap();
    assert_eq!(dep.linked_guardian_id, Some(guardian.id));

    // Durable record addressed to the dependent, unread.
    let unread = h.notifications.unread(&dep_ctx).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert!(!unread[0].is_read);
    assert!(unread[0].message.contains("mom"));

    // Live push reached the dependent's channel.
    let event = dep_rx.try_recv().unwrap();
    match event {
        OutboundEvent::Notification { payload } => {
            assert_eq!(payload.dependent_id, dependent.id);
            assert_eq!(payload.guardian_id, guardian.id);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn reject_is_silent_and_leaves_link_untouched() {
    let h = Harness::new();
    let (_, guardian_ctx) = h.guardian("mom", "555-9").await;
    let (dependent, dep_ctx) = h.dependent("kid", "555-1").await;

    let request = h.links.request_link(&dep_ctx, "555-9").await.unwrap();
    let updated = h
        .links
        .decide_request(&guardian_ctx, request.id, LinkDecision::Reject)
        .await
        .unwrap();
    assert_eq!(updated.status, LinkRequestStatus::Rejected);

    let dep = h.store.resolve_by_id(dependent.id).await.unwrap().unwrap();
    assert_eq!(dep.linked_guardian_id, None);

    // No notification addressed to the dependent on rejection.
    assert!(h.notifications.unread(&dep_ctx).await.unwrap().is_empty());
}

#[tokio::test]
async fn terminal_request_rejects_further_decisions() {
    let h = Harness::new();
    let (guardian, guardian_ctx) = h.guardian("mom", "555-9").await;
    let (dependent, dep_ctx) = h.dependent("kid", "555-1").await;

    let request = h.links.request_link(&dep_ctx, "555-9").await.unwrap();
    h.links
        .decide_request(&guardian_ctx, request.id, LinkDecision::Accept)
        .await
        .unwrap();

    let err = h
        .links
        .decide_request(&guardian_ctx, request.id, LinkDecision::Reject)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidState);

    // Stored state is unchanged by the failed transition.
    let dep = h.store.resolve_by_id(dependent.id).await.unwrap().unwrap();
    assert_eq!(dep.linked_guardian_id, Some(guardian.id));
}

#[tokio::test]
async fn only_the_named_guardian_may_decide() {
    let h = Harness::new();
    h.guardian("mom", "555-9").await;
    let (_, other_ctx) = h.guardian("stranger", "555-7").await;
    let (_, dep_ctx) = h.dependent("kid", "555-1").await;

    let request = h.links.request_link(&dep_ctx, "555-9").await.unwrap();

    let err = h
        .links
        .decide_request(&other_ctx, request.id, LinkDecision::Accept)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotAuthorized);

    // The dependent may not decide either.
    let err = h
        .links
        .decide_request(&dep_ctx, request.id, LinkDecision::Accept)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotAuthorized);
}

#[tokio::test]
async fn concurrent_decisions_yield_exactly_one_winner() {
    let h = Harness::new();
    let (_, guardian_ctx) = h.guardian("mom", "555-9").await;
    let (_, dep_ctx) = h.dependent("kid", "555-1").await;

    let request = h.links.request_link(&dep_ctx, "555-9").await.unwrap();

    let accept = h
        .links
        .decide_request(&guardian_ctx, request.id, LinkDecision::Accept);
    let reject = h
        .links
        .decide_request(&guardian_ctx, request.id, LinkDecision::Reject);
    let (a, r) = tokio::join!(accept, reject);

    let outcomes = [a.is_ok(), r.is_ok()];
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    for result in [a, r] {
        if let Err(err) = result {
            assert_eq!(err.kind, ErrorKind::InvalidState);
        }
    }
}

#[tokio::test]
async fn request_notifies_connected_guardian() {
    let h = Harness::new();
    let (guardian, guardian_ctx) = h.guardian("mom", "555-9").await;
    let (_, dep_ctx) = h.dependent("kid", "555-1").await;

    let mut guard_rx = h.connect(guardian.id);

    h.links.request_link(&dep_ctx, "555-9").await.unwrap();

    let unread = h.notifications.unread(&guardian_ctx).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert!(unread[0].message.contains("kid"));

    assert!(matches!(
        guard_rx.try_recv(),
        Ok(OutboundEvent::Notification { .. })
    ));
}

#[tokio::test]
async fn offline_guardian_still_gets_durable_record() {
    let h = Harness::new();
    let (_, guardian_ctx) = h.guardian("mom", "555-9").await;
    let (_, dep_ctx) = h.dependent("kid", "555-1").await;

    // No channel registered for the guardian.
    h.links.request_link(&dep_ctx, "555-9").await.unwrap();

    let unread = h.notifications.unread(&guardian_ctx).await.unwrap();
    assert_eq!(unread.len(), 1);
}

#[tokio::test]
async fn mark_read_is_idempotent_and_party_scoped() {
    let h = Harness::new();
    let (_, guardian_ctx) = h.guardian("mom", "555-9").await;
    let (_, dep_ctx) = h.dependent("kid", "555-1").await;
    let (_, outsider_ctx) = h.dependent("other", "555-2").await;

    h.links.request_link(&dep_ctx, "555-9").await.unwrap();
    let unread = h.notifications.unread(&guardian_ctx).await.unwrap();
    let id = unread[0].id;

    h.notifications.mark_read(&guardian_ctx, id).await.unwrap();
    h.notifications.mark_read(&guardian_ctx, id).await.unwrap();
    assert_eq!(h.notifications.unread_count(&guardian_ctx).await.unwrap(), 0);

    for _ in 0..2 {
        let err = h
            .notifications
            .mark_read(&outsider_ctx, id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotAuthorized);
    }
}

#[tokio::test]
async fn dependents_view_is_derived_from_back_reference() {
    let h = Harness::new();
    let (_, guardian_ctx) = h.guardian("mom", "555-9").await;
    let (d1, d1_ctx) = h.dependent("alice", "555-1").await;
    let (d2, d2_ctx) = h.dependent("bob", "555-2").await;

    for ctx in [&d1_ctx, &d2_ctx] {
        let request = h.links.request_link(ctx, "555-9").await.unwrap();
        h.links
            .decide_request(&guardian_ctx, request.id, LinkDecision::Accept)
            .await
            .unwrap();
    }

    let dependents = h.links.dependents(&guardian_ctx).await.unwrap();
    let ids: Vec<_> = dependents.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![d1.id, d2.id]);
}
