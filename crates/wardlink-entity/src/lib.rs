//! # wardlink-entity
//!
//! Domain models for WardLink: accounts, link requests, and notifications.
//! Models carry serde and sqlx derives so they map directly onto both the
//! wire format and the persisted rows.

pub mod account;
pub mod link_request;
pub mod notification;

pub use account::{Account, AccountRole};
pub use link_request::{LinkDecision, LinkRequest, LinkRequestStatus};
pub use notification::Notification;
