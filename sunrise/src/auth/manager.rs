//! Session manager implementation.

use super::{
    config::SessionConfig,
    errors::{AuthError, AuthResult, IssueError},
    models::{IdentityRecord, IssuedSession, SessionClaims},
};
use crate::codec;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, warn};
use rand::Rng;

/// Issues and verifies signed session tokens.
///
/// Holds only immutable key material, so one instance can be shared across
/// any number of concurrent requests.
#[derive(Clone)]
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    lifetime: Duration,
}

impl SessionManager {
    /// Create a new session manager
    ///
    /// # Arguments
    ///
    /// * `config` - Signing secret, issuer label and session lifetime
    ///
    /// # Returns
    ///
    /// * `SessionManager` - New session manager instance
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            validation,
            issuer: config.issuer.clone(),
            lifetime: config.lifetime,
        }
    }

    /// Issue a session token for `record` at the current time
    ///
    /// # Errors
    ///
    /// * `IssueError::Encode` - Record contains characters the codec cannot carry
    /// * `IssueError::Signing` - JWT signing failed
    pub fn issue(&self, record: &IdentityRecord) -> Result<IssuedSession, IssueError> {
        self.issue_at(record, &mut rand::rng(), Utc::now())
    }

    /// Issue a session token for `record`
    ///
    /// # Arguments
    ///
    /// * `record` - Identity to embed
    /// * `rng` - Randomness for the codec
    /// * `now` - Issuance time; the token expires one lifetime later
    ///
    /// # Returns
    ///
    /// * `Result<IssuedSession, IssueError>` - Signed token plus its claims
    pub fn issue_at<R: Rng + ?Sized>(
        &self,
        record: &IdentityRecord,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, IssueError> {
        let encoded = codec::encode(record, rng)?;
        let expires_at = now + self.lifetime;

        let claims = SessionClaims {
            encrypted_user: encoded.into_string(),
            iss: self.issuer.clone(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)?;
        debug!("Issued session token expiring at {}", expires_at);

        Ok(IssuedSession {
            token,
            claims,
            expires_at,
        })
    }

    /// Verify a presented token at the current time
    ///
    /// # Errors
    ///
    /// See [`SessionManager::verify_at`].
    pub fn verify(&self, token: Option<&str>) -> AuthResult<IdentityRecord> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a presented token and recover its identity
    ///
    /// # Arguments
    ///
    /// * `token` - Raw token value, if the transport carried one
    /// * `now` - Time to check expiry against
    ///
    /// # Returns
    ///
    /// * `AuthResult<IdentityRecord>` - Decoded identity or the failure class
    ///
    /// # Errors
    ///
    /// * `AuthError::Unauthenticated` - No token, or not three dot-separated segments
    /// * `AuthError::Invalid` - Signature, issuer, envelope or payload check failed
    /// * `AuthError::Expired` - `now` is at or past the expiration claim
    pub fn verify_at(&self, token: Option<&str>, now: DateTime<Utc>) -> AuthResult<IdentityRecord> {
        let token = token
            .map(str::trim)
            .filter(|token| is_token_shaped(token))
            .ok_or(AuthError::Unauthenticated)?;

        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Session token rejected: {}", e);
                AuthError::Invalid
            })?;

        if now.timestamp() >= data.claims.exp {
            debug!("Session token expired at {}", data.claims.exp);
            return Err(AuthError::Expired);
        }

        codec::decode(&data.claims.encrypted_user).map_err(|e| {
            warn!("Signed session payload failed to decode: {}", e);
            AuthError::Invalid
        })
    }
}

/// Header, payload and signature segments, all non-empty
fn is_token_shaped(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3 && segments.iter().all(|segment| !segment.is_empty())
}
