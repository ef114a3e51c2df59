//! Common types used across multiple handlers

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Portal path to evaluate
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PathQuery {
    /// Requested path, e.g. `/admin/payments`
    pub path: String,
}

/// Free-text filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive search term
    #[serde(default)]
    pub q: String,
}
