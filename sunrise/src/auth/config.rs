//! Session configuration.

use chrono::Duration;

/// Issuer label written into every token by default
pub const DEFAULT_ISSUER: &str = "sunrise";

/// Default session lifetime in hours
pub const DEFAULT_LIFETIME_HOURS: i64 = 24;

/// Session signing configuration
#[derive(Clone)]
pub struct SessionConfig {
    /// Shared HMAC secret
    pub secret: Vec<u8>,

    /// Issuer label, checked on verification
    pub issuer: String,

    /// Time from issuance to expiry
    pub lifetime: Duration,
}

impl SessionConfig {
    /// Create a configuration with the default issuer and a 24 hour lifetime
    ///
    /// # Arguments
    ///
    /// * `secret` - Shared signing secret
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            lifetime: Duration::hours(DEFAULT_LIFETIME_HOURS),
        }
    }

    /// Override the issuer label
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Override the session lifetime
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}
