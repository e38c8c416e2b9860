//! Application state shared across all handlers.

use std::sync::Arc;

use wardlink_auth::TokenDecoder;
use wardlink_core::config::AppConfig;
use wardlink_realtime::PresenceRegistry;
use wardlink_service::link::LinkService;
use wardlink_service::notification::NotificationService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Services are
/// held behind `Arc` so the state stays cheap to clone across tasks;
/// handlers never touch a store directly.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Access token decoder and validator.
    pub token_decoder: Arc<TokenDecoder>,
    /// Live channel registry for WebSocket connections.
    pub registry: Arc<PresenceRegistry>,
    /// Link workflow service.
    pub link_service: Arc<LinkService>,
    /// Notification ledger service.
    pub notification_service: Arc<NotificationService>,
}
