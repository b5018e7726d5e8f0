//! Request gating for protected routes.
//!
//! Two admission modes exist, chosen per route: basic credentials (the
//! caller re-supplies `user_name:password` on every request) and bearer
//! tokens minted at login. Both end the same way: the resolved user record
//! is attached to the request extensions and the pipeline continues, or the
//! request terminates with a 401 before any handler runs.
//!
//! Unknown user and wrong password are indistinguishable on the wire, as are
//! the different bearer-token faults. The specific cause is logged here and
//! nowhere else.

use crate::db::client::User;
use crate::types::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Admit a request carrying `Authorization: Basic <base64(user:pass)>`.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let token = strip_scheme(auth_header, "basic").ok_or(AppError::MissingBasicToken)?;

    let decoded = STANDARD
        .decode(token)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or(AppError::UnauthorizedRequest)?;
    let (user_name, password) = decoded
        .split_once(':')
        .ok_or(AppError::UnauthorizedRequest)?;

    if user_name.is_empty() || password.is_empty() {
        return Err(AppError::UnauthorizedRequest);
    }

    let user = state
        .db
        .user_by_name(user_name)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_name, "basic credentials for unknown user");
            AppError::UnauthorizedRequest
        })?;

    if !state
        .auth_service
        .verify_password(password, &user.password_hash)
        .await?
    {
        tracing::warn!(user_name, "basic credentials with wrong password");
        return Err(AppError::UnauthorizedRequest);
    }

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Admit a request carrying `Authorization: Bearer <token>`.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let token = strip_scheme(auth_header, "bearer").ok_or(AppError::MissingBearerToken)?;

    let claims = state.auth_service.verify_jwt(token).map_err(|e| {
        tracing::warn!(error = %e, "bearer token rejected");
        AppError::UnauthorizedRequest
    })?;

    let user = state
        .db
        .user_by_id(claims.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_id = claims.user_id, "bearer token for unknown user");
            AppError::UnauthorizedRequest
        })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Strip a `<scheme> ` prefix, matching the scheme case-insensitively.
fn strip_scheme<'a>(header: &'a str, scheme: &str) -> Option<&'a str> {
    let bytes = header.as_bytes();
    if bytes.len() > scheme.len()
        && bytes[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes())
        && bytes[scheme.len()] == b' '
    {
        // The prefix is ASCII, so this slice lands on a char boundary.
        Some(&header[scheme.len() + 1..])
    } else {
        None
    }
}

// Extractor for the admitted user
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// The user a gate attached to the request, for handlers that need to know
/// who is calling.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::UnauthorizedRequest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_scheme_is_case_insensitive() {
        assert_eq!(strip_scheme("Basic abc", "basic"), Some("abc"));
        assert_eq!(strip_scheme("BASIC abc", "basic"), Some("abc"));
        assert_eq!(strip_scheme("bearer t.t.t", "bearer"), Some("t.t.t"));
    }

    #[test]
    fn strip_scheme_rejects_other_schemes() {
        assert_eq!(strip_scheme("Bearer abc", "basic"), None);
        assert_eq!(strip_scheme("Basic abc", "bearer"), None);
        assert_eq!(strip_scheme("", "basic"), None);
        assert_eq!(strip_scheme("Basic", "basic"), None);
        assert_eq!(strip_scheme("Basicabc", "basic"), None);
    }
}
