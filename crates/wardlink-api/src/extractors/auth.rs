//! `AuthAccount` extractor — pulls the bearer token from the
//! Authorization header, validates it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use wardlink_core::error::AppError;
use wardlink_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated account context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthAccount(pub RequestContext);

impl AuthAccount {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthAccount {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header format"))?;

        let claims = state.token_decoder.decode(token)?;

        let ctx = RequestContext::new(claims.account_id(), claims.role, claims.username);
        Ok(AuthAccount(ctx))
    }
}
