//! Sign-in and session types

use bliss_core::{Identity, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mock sign-in: pick a role, optionally override the email
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub role: Role,
    #[schema(example = "resident@bliss3.com")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub identity: Identity,
    /// Landing route of the signed-in role
    #[schema(example = "/welcome")]
    pub redirect: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    #[schema(example = "/login")]
    pub redirect: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub identity: Option<Identity>,
    pub landing: Option<String>,
}
