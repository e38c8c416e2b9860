//! Link request lifecycle: ledger and workflow orchestrator.

pub mod ledger;
pub mod service;

pub use ledger::LinkRequestLedger;
pub use service::LinkService;
