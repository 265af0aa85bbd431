//! Session error types.

use crate::codec::CodecError;
use thiserror::Error;

/// Verification failures.
///
/// Every way a presented credential can be refused collapses into one of
/// these three classes; callers map them to transport-level responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential presented, or not even shaped like a token
    #[error("Token is not supplied")]
    Unauthenticated,

    /// Credential is authentic but past its lifetime
    #[error("Token expired")]
    Expired,

    /// Bad signature, malformed envelope, wrong issuer or corrupt payload
    #[error("Invalid token")]
    Invalid,
}

impl AuthError {
    /// Get a client-safe error message
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "Token is not supplied",
            AuthError::Expired => "token expired !",
            AuthError::Invalid => "Invalid Token !",
        }
    }

    /// Stable label for logs and metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "missing",
            AuthError::Expired => "expired",
            AuthError::Invalid => "invalid",
        }
    }
}

/// Result type for verification
pub type AuthResult<T> = Result<T, AuthError>;

/// Issuance failures.
///
/// Either means the server itself is misbehaving: the record was already
/// accepted upstream, and the signing key is fixed at startup.
#[derive(Debug, Error)]
pub enum IssueError {
    /// Record could not be encoded
    #[error("Identity encoding failed: {0}")]
    Encode(#[from] CodecError),

    /// JWT signing failed
    #[error("JWT error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}
