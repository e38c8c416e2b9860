//! Outbound WebSocket event type definitions.

use serde::{Deserialize, Serialize};

use wardlink_entity::notification::Notification;

/// Events pushed by the server to a connected client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// A notification record addressed to this account.
    Notification {
        /// The persisted notification.
        payload: Notification,
    },
    /// Server keepalive.
    Ping {
        /// Server timestamp (seconds since epoch).
        timestamp: i64,
    },
}
