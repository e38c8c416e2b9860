//! Link request entity.

pub mod model;
pub mod status;

pub use model::LinkRequest;
pub use status::{LinkDecision, LinkRequestStatus};
