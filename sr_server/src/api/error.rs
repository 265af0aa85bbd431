//! Mapping of session failures onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sunrise::auth::AuthError;

/// Status for an authentic but expired session.
///
/// Non-standard ("Page Expired"); clients use it to tell expiry apart from a
/// bad token and prompt for a fresh login.
pub const SESSION_EXPIRED: u16 = 419;

/// JSON body of every rejection
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

/// A request refused by the session layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    /// Verification failed
    Auth(AuthError),
    /// Authenticated, but not an administrator
    NotAdmin,
}

impl SessionRejection {
    /// HTTP status for this rejection
    pub fn status(&self) -> StatusCode {
        match self {
            SessionRejection::Auth(AuthError::Expired) => {
                StatusCode::from_u16(SESSION_EXPIRED).unwrap_or(StatusCode::UNAUTHORIZED)
            }
            SessionRejection::Auth(_) | SessionRejection::NotAdmin => StatusCode::UNAUTHORIZED,
        }
    }

    /// Client-safe message
    pub fn message(&self) -> &'static str {
        match self {
            SessionRejection::Auth(e) => e.client_message(),
            SessionRejection::NotAdmin => "You are not valid admin user !",
        }
    }
}

impl From<AuthError> for SessionRejection {
    fn from(e: AuthError) -> Self {
        SessionRejection::Auth(e)
    }
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            code: status.as_u16(),
            message: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
