//! Notification ledger service.

pub mod service;

pub use service::NotificationService;
