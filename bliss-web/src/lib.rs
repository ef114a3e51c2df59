//! Bliss Web Server
//!
//! HTTP surface of the Bliss III community portal: a JSON API guarded by the
//! role policy, server-rendered page shells and a cookie-backed session slot.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;

// Re-export main types
pub use error::{ApiError, ApiResult};
pub use server::BlissServer;
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, Router};
use bliss_core::{PortalConfig, SessionConfig};
use tower_http::trace::TraceLayer;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // API routes
        .nest("/api", routes::api_routes())
        // Everything else is a portal page resolved through the guard
        .fallback(handlers::page_fallback)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // photos attached to requests
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable development mode
    pub dev_mode: bool,
    /// Session cookie settings
    pub session: SessionConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::from_portal(&PortalConfig::default())
    }
}

impl WebConfig {
    /// Derive the web settings from the portal configuration
    pub fn from_portal(config: &PortalConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            dev_mode: config.server.dev_mode,
            session: config.session.clone(),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;
