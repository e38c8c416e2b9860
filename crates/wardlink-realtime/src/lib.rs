//! # wardlink-realtime
//!
//! Real-time delivery engine for WardLink. Provides:
//!
//! - A presence registry mapping accounts to their live channels,
//!   explicitly owned and injected rather than reached via static state
//! - Per-connection channel handles with buffered, non-blocking sends
//! - A dispatcher that fans a persisted notification out to every live
//!   channel of the addressee, best-effort

pub mod dispatcher;
pub mod event;
pub mod handle;
pub mod registry;

pub use dispatcher::Dispatcher;
pub use event::OutboundEvent;
pub use handle::{ChannelHandle, ChannelId};
pub use registry::PresenceRegistry;
