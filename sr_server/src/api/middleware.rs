//! Session middleware for protected endpoints.
//!
//! [`auth_middleware`] finds the session token, verifies it, and injects the
//! recovered [`IdentityRecord`] into request extensions. [`admin_middleware`]
//! runs after it and admits only records with the admin flag set.
//!
//! # Token sources
//!
//! 1. `Authorization: Bearer <token>`, unless the value after `Bearer` is blank
//! 2. The `token` cookie, whose value may be JSON-quoted
//!
//! # Extracting the identity
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use sunrise::auth::IdentityRecord;
//!
//! async fn protected_handler(Extension(record): Extension<IdentityRecord>) -> String {
//!     format!("Authenticated as {}", record.user_id)
//! }
//! # let _ = protected_handler;
//! ```

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sunrise::auth::IdentityRecord;
use tower_cookies::Cookies;
use tracing::debug;

use super::{AppState, error::SessionRejection};
use crate::{logging::log_security_event, metrics};

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE: &str = "token";

/// Verifies the session token and injects the identity record.
///
/// # Behavior
///
/// - **Success**: Injects `IdentityRecord` into request extensions, calls next handler
/// - **No token**: `401 Token is not supplied`
/// - **Expired**: `419 token expired !`
/// - **Anything else**: `401 Invalid Token !`
pub async fn auth_middleware(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Result<Response, SessionRejection> {
    let token = bearer_token(&request).or_else(|| {
        cookies
            .get(TOKEN_COOKIE)
            .map(|cookie| token_from_cookie_value(cookie.value()))
    });

    let result = state.session_manager.verify(token.as_deref());
    metrics::session_verification(&result);

    match result {
        Ok(record) => {
            debug!(user_id = %record.user_id, "Session verified");
            request.extensions_mut().insert(record);
            Ok(next.run(request).await)
        }
        Err(e) => {
            log_security_event(
                "session_rejected",
                None,
                Some(request.uri().path()),
                &e.to_string(),
            );
            Err(e.into())
        }
    }
}

/// Admits only identities carrying the admin flag.
///
/// Must run inside [`auth_middleware`]; a request without an injected
/// identity is refused the same way as a non-admin one.
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, SessionRejection> {
    let is_admin = request
        .extensions()
        .get::<IdentityRecord>()
        .is_some_and(|record| record.is_admin);

    if is_admin {
        return Ok(next.run(request).await);
    }

    metrics::admin_denials_total();
    let user_id = request
        .extensions()
        .get::<IdentityRecord>()
        .map(|record| record.user_id.as_str());
    log_security_event(
        "admin_denied",
        user_id,
        Some(request.uri().path()),
        "Non-admin identity on admin route",
    );
    Err(SessionRejection::NotAdmin)
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Unwrap a cookie value that may have been stored as a JSON string.
pub fn token_from_cookie_value(value: &str) -> String {
    serde_json::from_str::<String>(value).unwrap_or_else(|_| value.trim_matches('"').to_string())
}
