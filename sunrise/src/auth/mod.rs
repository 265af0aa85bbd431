//! Session module issuing and verifying signed session tokens.
//!
//! A session token is an HS256 JWT whose only payload claim, `encryptedUser`,
//! is the [codec](crate::codec) output for the user's identity. The token also
//! carries an issuer label and an absolute expiration (24 hours by default).
//! The server keeps no session state: the token is the session.
//!
//! Verification is a pure function of the token, the secret and the current
//! time, and classifies every failure as one of:
//! - [`AuthError::Unauthenticated`]: nothing usable was presented
//! - [`AuthError::Expired`]: authentic, but at or past its expiration
//! - [`AuthError::Invalid`]: forged, malformed, wrong issuer, or corrupt payload
//!
//! ## Example
//!
//! ```
//! use sunrise::auth::{AuthError, IdentityRecord, SessionConfig, SessionManager};
//!
//! let manager = SessionManager::new(&SessionConfig::new("a_shared_secret_of_reasonable_length"));
//!
//! let record = IdentityRecord {
//!     id: "507f1f77bcf86cd799439011".to_string(),
//!     name: "Sun".to_string(),
//!     email: "sun@test.com".to_string(),
//!     user_id: "sunrise".to_string(),
//!     is_admin: true,
//!     created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
//! };
//!
//! let session = manager.issue(&record).unwrap();
//! assert_eq!(manager.verify(Some(&session.token)), Ok(record));
//! assert_eq!(manager.verify(None), Err(AuthError::Unauthenticated));
//! ```

pub mod config;
pub mod errors;
pub mod manager;
pub mod models;

pub use config::SessionConfig;
pub use errors::{AuthError, AuthResult, IssueError};
pub use manager::SessionManager;
pub use models::{IdentityRecord, IssuedSession, SessionClaims};
