//! # wardlink-service
//!
//! Business logic layer for WardLink: the link request ledger, the link
//! workflow orchestrator, and the notification service.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod link;
pub mod notification;

pub use context::RequestContext;
pub use link::{LinkRequestLedger, LinkService};
pub use notification::NotificationService;
