//! Sunrise session server.
//!
//! Verifies signed session tokens presented as a bearer header or a `token`
//! cookie, and serves the identity they carry.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error};
use pico_args::Arguments;
use sr_server::{
    api::{self, AppState},
    config::ServerConfig,
    logging, metrics,
};
use sunrise::auth::SessionManager;
use tracing::{info, warn};

const HELP: &str = "\
Run the sunrise session server

USAGE:
  sr_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:5000]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  JWT_SECRET               JWT signing secret, at least 32 bytes (required)
  JWT_ISSUER               Issuer label [default: sunrise]
  SESSION_LIFETIME_HOURS   Session lifetime [default: 24]
  METRICS_BIND             Prometheus exporter address (disabled when unset)
  RUST_LOG                 Log filter
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs
        .opt_value_from_str("--bind")
        .context("Invalid --bind address")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override)?;
    info!(?config, "Configuration loaded");

    if let Some(metrics_bind) = config.metrics_bind {
        match metrics::init_metrics(metrics_bind) {
            Ok(()) => info!("Prometheus metrics at http://{}/metrics", metrics_bind),
            Err(e) => warn!("{}", e),
        }
    }

    let state = AppState {
        session_manager: Arc::new(SessionManager::new(&config.security.session_config())),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for CTRL+C: {}", e);
        std::future::pending::<()>().await;
    }
}
