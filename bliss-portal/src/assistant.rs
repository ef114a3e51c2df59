//! AI concierge seam
//!
//! The portal talks to a language model through [`Assistant`]. No provider
//! ships with the workspace; the web server answers 503 when none is
//! configured.

use crate::{PortalError, PortalResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Greeting shown before the first exchange
pub const GREETING: &str =
    "Hello! I'm the Bliss III concierge. How can I help you with community services today?";

/// Instruction sent with a photo attached to a service request
pub const REQUEST_SCAN_INSTRUCTION: &str = "What is the issue in this image? Provide a short title \
     and detailed description for a maintenance request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// Inline image, base64 encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub data: String,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn validate(&self) -> PortalResult<()> {
        if self.data.trim().is_empty() {
            return Err(PortalError::validation("Image data must not be empty"));
        }
        if !self.mime_type.starts_with("image/") {
            return Err(PortalError::validation(format!(
                "Unsupported image type: {}",
                self.mime_type
            )));
        }
        Ok(())
    }
}

/// Language model collaborator
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Continue a conversation with `message`
    async fn chat(&self, history: &[ConversationTurn], message: &str) -> PortalResult<String>;

    /// Describe an image following `instruction`
    async fn analyze_image(&self, image: &ImagePayload, instruction: &str)
        -> PortalResult<String>;
}

/// Service request pre-filled from an image analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RequestDraft {
    pub title: String,
    pub description: String,
}

impl RequestDraft {
    /// First line becomes the title (minus any "Title:" label); the whole
    /// answer becomes the description.
    pub fn from_analysis(analysis: &str) -> Self {
        let first_line = analysis.lines().next().unwrap_or_default().trim();
        let title = match first_line.get(..5) {
            Some(prefix) if prefix.eq_ignore_ascii_case("title") => first_line[5..]
                .trim_start_matches(':')
                .trim(),
            _ => first_line,
        };

        Self {
            title: title.to_string(),
            description: analysis.trim().to_string(),
        }
    }
}
