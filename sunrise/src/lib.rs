//! # Sunrise
//!
//! Session credentials for an HTTP application.
//!
//! An authenticated user's identity is packed by a reversible, randomized
//! [codec] into an opaque string, which is then wrapped in a signed,
//! time-limited token by the [auth] session manager. On each request the token
//! is verified and the identity recovered, or the request is refused with a
//! classified failure the caller maps to a response.
//!
//! ```text
//! issue:  IdentityRecord ─ codec::encode ─ JWT { encryptedUser, iss, exp } ─ token
//! verify: token ─ signature/issuer ─ expiry ─ codec::decode ─ IdentityRecord
//! ```
//!
//! ## Core Modules
//!
//! - [`codec`]: Field codec (encode/decode of identity records)
//! - [`auth`]: Session manager (issuance and verification)
//!
//! Both layers are stateless. Randomness and time are passed in explicitly by
//! the `*_at` entry points so behaviour is reproducible under test.

/// Field codec for identity records.
pub mod codec;

/// Signed session tokens.
pub mod auth;

pub use auth::{AuthError, AuthResult, IdentityRecord, SessionConfig, SessionManager};
