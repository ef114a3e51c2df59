//! Concierge request/response types

use bliss_portal::{ConversationTurn, ImagePayload};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Earlier turns, oldest first
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[schema(example = "When is the trash collected?")]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeImageRequest {
    pub image: ImagePayload,
    /// Overrides the default request-scan prompt
    pub instruction: Option<String>,
}
