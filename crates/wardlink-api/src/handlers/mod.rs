//! HTTP and WebSocket handlers.

pub mod health;
pub mod link;
pub mod notification;
pub mod ws;
