//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Body for creating a link request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    /// Phone number of the guardian to link with.
    pub guardian_phone_number: String,
}

/// Body for deciding a pending link request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDecisionRequest {
    /// Either `accept` or `reject`.
    pub decision: String,
}
