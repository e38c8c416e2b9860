//! Link request lifecycle status and guardian decisions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a link request.
///
/// The state machine is `pending → accepted` or `pending → rejected`;
/// both terminal states are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "link_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LinkRequestStatus {
    /// Awaiting the guardian's decision.
    Pending,
    /// Approved; the link was established.
    Accepted,
    /// Declined; no link was established.
    Rejected,
}

impl LinkRequestStatus {
    /// Whether this status permits no further transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LinkRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A guardian's decision on a pending link request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDecision {
    /// Approve the request and establish the link.
    Accept,
    /// Decline the request.
    Reject,
}

impl LinkDecision {
    /// The terminal status this decision transitions a pending request to.
    pub fn resulting_status(&self) -> LinkRequestStatus {
        match self {
            Self::Accept => LinkRequestStatus::Accepted,
            Self::Reject => LinkRequestStatus::Rejected,
        }
    }
}

impl FromStr for LinkDecision {
    type Err = wardlink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            _ => Err(wardlink_core::AppError::validation(format!(
                "Invalid decision: '{s}'. Expected one of: accept, reject"
            ))),
        }
    }
}
