//! PostgreSQL implementations of the store contracts.

pub mod account;
pub mod link_request;
pub mod notification;

pub use account::AccountRepository;
pub use link_request::LinkRequestRepository;
pub use notification::NotificationRepository;

use wardlink_core::error::{AppError, ErrorKind};

/// Map a sqlx error to the store taxonomy.
///
/// Connectivity and query failures surface as `StoreUnavailable`; callers
/// that need finer mapping (unique violations) match before delegating here.
pub(crate) fn store_error(context: &str, err: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::StoreUnavailable, context.to_string(), err)
}
