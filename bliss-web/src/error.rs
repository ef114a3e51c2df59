//! JSON error responses for the API

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use bliss_portal::PortalError;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Body of every API error
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "unauthenticated")]
    pub error: String,
    pub message: String,
    /// Where the client should navigate instead, for access denials
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/login")]
    pub redirect: Option<String>,
}

/// Errors returned by API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Sign in required")]
    Unauthenticated { redirect: String },

    #[error("Not available for this role")]
    Forbidden { redirect: String },

    /// Routine redirect for a signed-in user, not a denial
    #[error("Continue at {redirect}")]
    Redirect { redirect: String },

    #[error("{0}")]
    Unavailable(String),

    #[error(transparent)]
    Portal(#[from] PortalError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Redirect { .. } => StatusCode::SEE_OTHER,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Portal(err) => match err {
                PortalError::Validation { .. } => StatusCode::BAD_REQUEST,
                PortalError::NotFound { .. } => StatusCode::NOT_FOUND,
                PortalError::Permission { .. } => StatusCode::FORBIDDEN,
                PortalError::Assistant { .. } => StatusCode::BAD_GATEWAY,
                PortalError::Core(core) if core.is_recoverable() => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated { .. } => "unauthenticated",
            ApiError::Forbidden { .. } => "permission_denied",
            ApiError::Redirect { .. } => "redirect",
            ApiError::Unavailable(_) => "unavailable",
            ApiError::Portal(err) => match err {
                PortalError::Validation { .. } => "validation_failed",
                PortalError::NotFound { .. } => "not_found",
                PortalError::Permission { .. } => "permission_denied",
                PortalError::Assistant { .. } => "assistant_failed",
                PortalError::Core(core) if core.is_recoverable() => "unavailable",
                _ => "internal_error",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Portal(PortalError::Core(core)) = &self {
            core.log();
        } else if status.is_server_error() {
            error!("❌ API error: {}", self);
        } else if status == StatusCode::FORBIDDEN {
            warn!("🚫 {}", self);
        }

        let redirect = match &self {
            ApiError::Unauthenticated { redirect }
            | ApiError::Forbidden { redirect }
            | ApiError::Redirect { redirect } => Some(redirect.clone()),
            _ => None,
        };

        let location = match &self {
            ApiError::Redirect { redirect } => HeaderValue::from_str(redirect).ok(),
            _ => None,
        };

        let body = ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            redirect,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(location) = location {
            response.headers_mut().insert(header::LOCATION, location);
        }
        response
    }
}
