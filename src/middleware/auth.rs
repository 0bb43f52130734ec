//! Auth middleware: Bearer token check for protected routes, and the `AuthUser` extractor.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated user ID, decoded from the request's token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser(pub i64);

/// Token from the `Authorization` header. The `Bearer ` prefix is optional.
fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let raw = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw).trim();
    if token.is_empty() {
        return Err(AppError::Auth("Access denied".to_string()));
    }
    Ok(token)
}

/// Middleware: reject requests without a valid token, otherwise attach `AuthUser`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = match bearer_token(request.headers()) {
        Ok(token) => state.jwt_secret().validate(token)?,
        Err(e) => {
            debug!(path = %request.uri().path(), "rejected request: missing token");
            return Err(e);
        }
    };
    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}

/// Reads the `AuthUser` attached by `require_auth`; routes outside that layer are denied.
#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| AppError::Auth("Access denied".to_string()))
    }
}
