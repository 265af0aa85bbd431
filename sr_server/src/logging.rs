//! Structured logging configuration.
//!
//! Console logging through `tracing`, with security events recorded as
//! structured fields. Log records emitted by the `sunrise` library through the
//! `log` facade are captured by the same subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset
///
/// `tower_http` and `hyper` are held at `warn` so per-request and connection
/// chatter does not bury the session rejections logged at `warn`.
pub const DEFAULT_FILTER: &str = "info,sunrise=info,tower_http=warn,hyper=warn";

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var.
///
/// # Example
///
/// ```no_run
/// use sr_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Targets tell library records (`sunrise::auth::manager`) from server ones.
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log security event with structured data
///
/// Never pass token values or secrets as `message`.
///
/// # Arguments
///
/// * `event_type` - Type of security event
/// * `user_id` - Optional public login handle
/// * `path` - Optional request path
/// * `message` - Event message
///
/// # Example
///
/// ```
/// use sr_server::logging::log_security_event;
///
/// log_security_event(
///     "session_rejected",
///     None,
///     Some("/api/v1/session"),
///     "Token expired"
/// );
/// ```
pub fn log_security_event(
    event_type: &str,
    user_id: Option<&str>,
    path: Option<&str>,
    message: &str,
) {
    tracing::warn!(
        event_type = event_type,
        user_id = user_id,
        path = path,
        "SECURITY: {}",
        message
    );
}
