//! Bliss Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main portal web server
pub struct BlissServer {
    config: WebConfig,
    state: AppState,
}

impl BlissServer {
    /// Create a new server over the seeded community
    pub fn new(config: WebConfig) -> Self {
        let state = AppState::new(config.clone());
        Self { config, state }
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("🚀 Starting Bliss III Portal");
        info!("📍 Server address: http://{}", address);
        info!("🔧 Development mode: {}", self.config.dev_mode);
        if self.state.assistant.is_none() {
            info!("🤖 No assistant configured, concierge endpoints answer 503");
        }

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("✅ Server listening on http://{}", address);

        if let Err(e) = serve(listener, app).await {
            error!("❌ Server error: {}", e);
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for BlissServer
pub struct BlissServerBuilder {
    config: WebConfig,
}

impl BlissServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: WebConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable development mode
    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.dev_mode = dev_mode;
        self
    }

    /// Build the server
    pub fn build(self) -> WebResult<BlissServer> {
        if self.config.port == 0 {
            return Err(WebError::Config("Server port must be greater than 0".to_string()));
        }
        Ok(BlissServer::new(self.config))
    }
}

impl Default for BlissServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let server = BlissServerBuilder::new()
            .host("0.0.0.0")
            .port(3000)
            .dev_mode(true)
            .build()
            .unwrap();

        assert_eq!(server.config().address(), "0.0.0.0:3000");
        assert!(server.config().dev_mode);
        assert!(server.state().assistant.is_none());
    }

    #[test]
    fn test_builder_rejects_port_zero() {
        assert!(matches!(
            BlissServerBuilder::new().port(0).build(),
            Err(WebError::Config(_))
        ));
    }
}
