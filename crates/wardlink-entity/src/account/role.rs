//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two kinds of accounts in a supervised link.
///
/// A guardian may supervise many dependents; a dependent is linked to at
/// most one guardian at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Supervising account.
    Guardian,
    /// Supervised account.
    Dependent,
}

impl AccountRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guardian => "guardian",
            Self::Dependent => "dependent",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = wardlink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guardian" => Ok(Self::Guardian),
            "dependent" => Ok(Self::Dependent),
            _ => Err(wardlink_core::AppError::validation(format!(
                "Invalid account role: '{s}'. Expected one of: guardian, dependent"
            ))),
        }
    }
}
