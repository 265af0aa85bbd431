//! HTTP API for sunrise sessions.
//!
//! # Modules
//!
//! - [`middleware`]: Session and admin guards for protected endpoints
//! - [`session`]: Session handlers plus issuance and cookie helpers
//! - [`error`]: Mapping of session failures onto HTTP responses
//!
//! # Endpoints
//!
//! ```text
//! GET /health                  - Health check (public)
//! GET /api/v1/session          - Identity behind the session (auth required)
//! GET /api/v1/admin/session    - Same, admin only (auth + admin required)
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use sr_server::api::{create_router, AppState};
//! use std::sync::Arc;
//! use sunrise::auth::{SessionConfig, SessionManager};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let manager = SessionManager::new(&SessionConfig::new("a_secret_of_at_least_thirty_two_bytes"));
//! let app = create_router(AppState {
//!     session_manager: Arc::new(manager),
//! });
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod error;
pub mod middleware;
pub mod session;

use axum::{
    Router,
    response::{IntoResponse, Json},
    routing::get,
};
use serde_json::json;
use std::sync::Arc;
use sunrise::auth::SessionManager;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the session manager sits behind an `Arc` and is never
/// mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub session_manager: Arc<SessionManager>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", create_v1_router(state.clone()))
        .layer(CookieManagerLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn create_v1_router(state: AppState) -> Router<AppState> {
    // Layers run outside-in, so the admin guard sees the injected identity.
    let admin_routes = Router::new()
        .route("/admin/session", get(session::admin_session))
        .route_layer(axum::middleware::from_fn(middleware::admin_middleware));

    Router::new()
        .route("/session", get(session::current_session))
        .merge(admin_routes)
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth_middleware,
        ))
}

/// Health check endpoint for monitoring and load balancers.
///
/// ```bash
/// curl http://localhost:5000/health
/// # {"status":"healthy","version":"0.1.0","timestamp":"2026-01-01T10:30:00Z"}
/// ```
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
