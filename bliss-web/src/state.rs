//! Shared application state

use crate::WebConfig;
use bliss_portal::{Assistant, Community, RolePolicy};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// State shared by every request
///
/// The session is not part of it: each request rebuilds its own session
/// store from the cookie jar.
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Route allow-lists, navigation and landing routes
    pub policy: Arc<RolePolicy>,
    /// Residents, payments, requests and bulletins
    pub community: Arc<RwLock<Community>>,
    /// AI concierge; requests answer 503 while unset
    pub assistant: Option<Arc<dyn Assistant>>,
}

impl AppState {
    /// Create state over the seeded demo community
    pub fn new(config: WebConfig) -> Self {
        Self::with_community(config, Community::seeded())
    }

    pub fn with_community(config: WebConfig, community: Community) -> Self {
        let policy = RolePolicy::standard();
        info!(
            "📋 Loaded role policy with {} routes, {} residents on file",
            policy.routes().len(),
            community.directory.list().len()
        );

        Self {
            config,
            policy: Arc::new(policy),
            community: Arc::new(RwLock::new(community)),
            assistant: None,
        }
    }

    /// Attach an assistant implementation
    pub fn with_assistant(mut self, assistant: Arc<dyn Assistant>) -> Self {
        self.assistant = Some(assistant);
        self
    }
}
