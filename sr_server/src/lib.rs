//! HTTP host for sunrise session verification.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
