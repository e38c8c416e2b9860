//! Individual live channel handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::event::OutboundEvent;

/// Unique channel identifier.
pub type ChannelId = Uuid;

/// A handle to a single live delivery channel (one WebSocket connection).
///
/// Holds the sender half for pushing events to the client; the transport
/// task owns the receiver and forwards events onto the socket. Sends are
/// non-blocking: a full buffer drops the event, the persisted notification
/// record remains the durable fallback.
#[derive(Debug)]
pub struct ChannelHandle {
    /// Unique channel ID.
    pub id: ChannelId,
    /// Account this channel belongs to.
    pub account_id: Uuid,
    /// Sender for outbound events.
    sender: mpsc::Sender<OutboundEvent>,
    /// When the channel was established.
    pub connected_at: DateTime<Utc>,
    /// Whether the channel is still alive.
    alive: AtomicBool,
}

impl ChannelHandle {
    /// Create a new channel handle.
    pub fn new(account_id: Uuid, sender: mpsc::Sender<OutboundEvent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Push an event to this channel. Returns `false` if the push failed.
    pub fn send(&self, event: OutboundEvent) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(channel_id = %self.id, "Channel send buffer full, dropping event");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check whether the channel is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the channel as dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
