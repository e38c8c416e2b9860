//! Presence registry — tracks all live channels indexed by account ID.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use super::handle::{ChannelHandle, ChannelId};

/// Thread-safe registry of all live delivery channels.
///
/// Created once at process start and passed by `Arc` to the dispatcher
/// and the transport layer; intentionally not a process-wide static.
/// Not persisted — rebuilt from scratch on restart, which only delays
/// delivery because the notification ledger record survives.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    /// Account ID → list of channel handles (multi-device, no cap).
    by_account: DashMap<Uuid, Vec<Arc<ChannelHandle>>>,
    /// Channel ID → channel handle for direct lookup.
    by_id: DashMap<ChannelId, Arc<ChannelHandle>>,
}

impl PresenceRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a live channel for its account.
    pub fn register(&self, handle: Arc<ChannelHandle>) {
        self.by_id.insert(handle.id, handle.clone());
        self.by_account
            .entry(handle.account_id)
            .or_default()
            .push(handle.clone());

        info!(
            channel_id = %handle.id,
            account_id = %handle.account_id,
            "Channel registered"
        );
    }

    /// Unregisters a channel, pruning the account entry if it empties.
    pub fn unregister(&self, channel_id: &ChannelId) -> Option<Arc<ChannelHandle>> {
        let (_, handle) = self.by_id.remove(channel_id)?;
        handle.mark_dead();

        if let Some(mut channels) = self.by_account.get_mut(&handle.account_id) {
            channels.retain(|c| c.id != *channel_id);
            if channels.is_empty() {
                drop(channels);
                self.by_account.remove(&handle.account_id);
            }
        }

        info!(
            channel_id = %channel_id,
            account_id = %handle.account_id,
            "Channel unregistered"
        );
        Some(handle)
    }

    /// Returns a snapshot of the account's live channels.
    ///
    /// Callers must not assume a returned channel stays valid; a racing
    /// disconnect simply makes the subsequent push fail harmlessly.
    pub fn channels_for(&self, account_id: Uuid) -> Vec<Arc<ChannelHandle>> {
        self.by_account
            .get(&account_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Whether the account has at least one live channel.
    pub fn is_online(&self, account_id: Uuid) -> bool {
        self.by_account
            .get(&account_id)
            .map(|entry| !entry.value().is_empty())
            .unwrap_or(false)
    }

    /// Total number of live channels.
    pub fn channel_count(&self) -> usize {
        self.by_id.len()
    }

    /// Number of distinct online accounts.
    pub fn online_count(&self) -> usize {
        self.by_account.len()
    }
}
