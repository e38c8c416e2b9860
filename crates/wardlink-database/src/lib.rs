//! # wardlink-database
//!
//! Store contracts consumed by the link workflow, their PostgreSQL
//! implementations, an in-memory implementation for tests and single-node
//! development, plus connection-pool and migration management.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::create_pool;
pub use memory::MemoryStore;
pub use store::{AccountStore, LinkRequestStore, NotificationStore};
