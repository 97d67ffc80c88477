//! Bearer-token extraction for protected routes

use crate::handlers::{ApiError, AppState};
use crate::session::{Role, SessionError};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// An authenticated principal, extracted from the Authorization header
///
/// Missing, malformed, or expired tokens reject with 401 before the handler
/// runs. Role checks are the handler's responsibility via
/// [`AuthUser::require_admin`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Principal identifier (JWT `sub`)
    pub user_id: String,

    /// Principal role
    pub role: Role,
}

impl AuthUser {
    /// Whether this principal is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Reject with 403 unless this principal is an administrator
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Administrator role required".to_string()))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

        let claims = state.sessions.validate_token(token).map_err(|e| match e {
            SessionError::TokenExpired => {
                ApiError::Unauthorized("Session token expired".to_string())
            }
            _ => ApiError::Unauthorized("Invalid session token".to_string()),
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
