//! Notification dispatcher — fans a persisted record out to live channels.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use wardlink_entity::notification::Notification;

use crate::event::OutboundEvent;
use crate::registry::PresenceRegistry;

/// Pushes notification events to every live channel of an addressee.
///
/// Delivery is best-effort: a failed push is logged and swallowed, never
/// surfaced to the triggering caller. The persisted notification record
/// is the durability guarantee; an offline addressee sees it on the next
/// dashboard fetch.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<PresenceRegistry>,
}

impl Dispatcher {
    /// Create a new dispatcher over the given registry.
    pub fn new(registry: Arc<PresenceRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver a notification to all live channels of `addressee_id`.
    ///
    /// Returns the number of channels the event was pushed to; zero when
    /// the addressee is offline, which is not an error.
    pub fn deliver(&self, notification: &Notification, addressee_id: Uuid) -> usize {
        let channels = self.registry.channels_for(addressee_id);
        if channels.is_empty() {
            debug!(
                addressee_id = %addressee_id,
                notification_id = %notification.id,
                "Addressee offline, skipping live delivery"
            );
            return 0;
        }

        let mut delivered = 0;
        for channel in &channels {
            let event = OutboundEvent::Notification {
                payload: notification.clone(),
            };
            if channel.send(event) {
                delivered += 1;
            } else {
                warn!(
                    channel_id = %channel.id,
                    addressee_id = %addressee_id,
                    notification_id = %notification.id,
                    "Failed to push notification to channel"
                );
            }
        }

        debug!(
            addressee_id = %addressee_id,
            notification_id = %notification.id,
            delivered,
            total = channels.len(),
            "Notification dispatched"
        );
        delivered
    }
}
