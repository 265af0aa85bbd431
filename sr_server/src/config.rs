//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use chrono::Duration;
use std::net::SocketAddr;
use sunrise::auth::{SessionConfig, config::DEFAULT_ISSUER, config::DEFAULT_LIFETIME_HOURS};

/// Minimum signing secret length in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Default bind address
pub const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 5000);

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Security configuration
    pub security: SecurityConfig,
    /// Prometheus exporter address, if metrics are enabled
    pub metrics_bind: Option<SocketAddr>,
}

/// Security-related configuration
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT signing secret (required)
    pub jwt_secret: String,
    /// Issuer label written into and required of every token
    pub jwt_issuer: String,
    /// Session lifetime in hours
    pub session_lifetime_hours: i64,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("session_lifetime_hours", &self.session_lifetime_hours)
            .finish()
    }
}

impl SecurityConfig {
    /// Session configuration for the session manager
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.jwt_secret.as_bytes())
            .with_issuer(self.jwt_issuer.clone())
            .with_lifetime(Duration::hours(self.session_lifetime_hours))
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    ///
    /// # Returns
    ///
    /// * `Result<ServerConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(bind_override: Option<SocketAddr>) -> Result<Self, ConfigError> {
        Self::from_lookup(bind_override, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_lookup<F>(bind_override: Option<SocketAddr>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_optional("SERVER_BIND", lookup("SERVER_BIND"))?
                .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND)),
        };

        // Security configuration (REQUIRED)
        let jwt_secret = lookup("JWT_SECRET").ok_or_else(|| ConfigError::MissingRequired {
            var: "JWT_SECRET".to_string(),
            hint: "Generate with: openssl rand -hex 32".to_string(),
        })?;

        let security = SecurityConfig {
            jwt_secret,
            jwt_issuer: lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
            session_lifetime_hours: parse_optional(
                "SESSION_LIFETIME_HOURS",
                lookup("SESSION_LIFETIME_HOURS"),
            )?
            .unwrap_or(DEFAULT_LIFETIME_HOURS),
        };

        let metrics_bind = parse_optional("METRICS_BIND", lookup("METRICS_BIND"))?;

        let config = ServerConfig {
            bind,
            security,
            metrics_bind,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                var: "JWT_SECRET".to_string(),
                reason: format!("Must be at least {MIN_SECRET_LEN} characters (128-bit security)"),
            });
        }

        if self.security.jwt_issuer.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "JWT_ISSUER".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.security.session_lifetime_hours <= 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_LIFETIME_HOURS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse a variable if it is set
fn parse_optional<T>(key: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    value
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("Cannot parse {value:?}"),
            })
        })
        .transpose()
}
