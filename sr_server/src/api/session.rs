//! Session handlers and issuance helpers.
//!
//! This server only verifies sessions; it has no login route. [`issue_token`]
//! and [`session_cookie`] are the issuance boundary for code that embeds the
//! router next to its own credential check. `sessions_issued_total` counts
//! issuances made through [`issue_token`].

use axum::{Json, extract::Extension};
use chrono::Duration;
use sunrise::auth::{IdentityRecord, IssueError, IssuedSession};
use tower_cookies::{
    Cookie,
    cookie::{SameSite, time},
};
use tracing::info;

use super::{AppState, middleware::TOKEN_COOKIE};
use crate::metrics;

/// Returns the identity behind the presented session.
///
/// Requires [`auth_middleware`](super::middleware::auth_middleware).
pub async fn current_session(Extension(record): Extension<IdentityRecord>) -> Json<IdentityRecord> {
    Json(record)
}

/// Same as [`current_session`], behind the admin guard.
pub async fn admin_session(Extension(record): Extension<IdentityRecord>) -> Json<IdentityRecord> {
    Json(record)
}

/// Issue a session for `record` with the server's session manager.
///
/// # Errors
///
/// * `IssueError::Encode` - Record holds characters the codec cannot carry
/// * `IssueError::Signing` - JWT signing failed
pub fn issue_token(state: &AppState, record: &IdentityRecord) -> Result<IssuedSession, IssueError> {
    let session = state.session_manager.issue(record)?;
    metrics::sessions_issued_total();
    info!(user_id = %record.user_id, expires_at = %session.expires_at, "Session issued");
    Ok(session)
}

/// Build the cookie that carries a session token.
///
/// The value is stored JSON-quoted, which the middleware unwraps again.
pub fn session_cookie(token: &str, lifetime: Duration) -> Cookie<'static> {
    let value = serde_json::Value::String(token.to_string()).to_string();
    let mut cookie = Cookie::new(TOKEN_COOKIE, value);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::seconds(lifetime.num_seconds()));
    cookie
}
