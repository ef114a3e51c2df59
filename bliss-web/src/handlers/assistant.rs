//! AI concierge handlers
//!
//! Both endpoints answer 503 until an [`Assistant`] is attached to the
//! state.

use super::types::{AnalyzeImageRequest, ChatRequest, ChatResponse};
use crate::auth::Session;
use crate::error::ErrorResponse;
use crate::{ApiError, ApiResult, AppState};
use axum::{extract::State, response::Json};
use bliss_portal::assistant::REQUEST_SCAN_INSTRUCTION;
use bliss_portal::{paths, Assistant, PortalError, RequestDraft};
use std::sync::Arc;
use tracing::debug;

fn configured(state: &AppState) -> ApiResult<Arc<dyn Assistant>> {
    state
        .assistant
        .clone()
        .ok_or_else(|| ApiError::Unavailable("The concierge is not configured".to_string()))
}

/// Ask the concierge a question
#[utoipa::path(
    post,
    path = "/api/assistant/chat",
    tag = "Assistant",
    summary = "Chat with the concierge",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Concierge reply", body = ChatResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 503, description = "No assistant configured", body = ErrorResponse)
    )
)]
pub async fn assistant_chat(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let identity = session.require_signed_in()?;
    let assistant = configured(&state)?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(PortalError::validation("Message must not be empty").into());
    }

    debug!(
        "💬 {} asked the concierge ({} earlier turns)",
        identity.id,
        request.history.len()
    );
    let reply = assistant.chat(&request.history, message).await?;
    Ok(Json(ChatResponse { reply }))
}

/// Draft a service request from a photo
#[utoipa::path(
    post,
    path = "/api/assistant/analyze-image",
    tag = "Assistant",
    summary = "Scan a photo for a service request",
    request_body = AnalyzeImageRequest,
    responses(
        (status = 200, description = "Title and description draft", body = RequestDraft),
        (status = 400, description = "Not an image", body = ErrorResponse),
        (status = 403, description = "Residents only", body = ErrorResponse),
        (status = 503, description = "No assistant configured", body = ErrorResponse)
    )
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AnalyzeImageRequest>,
) -> ApiResult<Json<RequestDraft>> {
    session.require(&state.policy, paths::RESIDENT_SUBMIT_REQUEST)?;
    let assistant = configured(&state)?;
    request.image.validate()?;

    let instruction = request
        .instruction
        .as_deref()
        .unwrap_or(REQUEST_SCAN_INSTRUCTION);
    let analysis = assistant.analyze_image(&request.image, instruction).await?;
    Ok(Json(RequestDraft::from_analysis(&analysis)))
}
