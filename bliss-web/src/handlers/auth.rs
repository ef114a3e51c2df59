//! Mock sign-in, sign-out and session inspection

use super::types::{LoginRequest, LoginResponse, LogoutResponse, SessionResponse};
use crate::auth::{open_session, Session};
use crate::{ApiResult, AppState};
use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;
use bliss_portal::{paths, sign_in, MockCredentials};
use tracing::info;

/// Sign in as the canned identity of a role
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    summary = "Mock sign-in",
    description = "Sign in as the demo identity of the chosen role and set the session cookie",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 500, description = "Session could not be stored", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let mut credentials = MockCredentials::new(request.role);
    if let Some(email) = request.email {
        credentials = credentials.with_email(email);
    }
    let identity = sign_in(&credentials);

    let mut store = open_session(jar, &state.config.session);
    store.login(identity.clone())?;

    let redirect = state.policy.landing_route_for(identity.role).to_string();
    info!("🔑 {} signed in, landing on {}", identity.display_string(), redirect);

    Ok((
        store.into_slot().into_jar(),
        Json(LoginResponse { identity, redirect }),
    ))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    summary = "Sign out",
    description = "Clear the session. Signing out twice is the same as once.",
    responses(
        (status = 200, description = "Signed out", body = LogoutResponse)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<LogoutResponse>)> {
    let mut store = open_session(jar, &state.config.session);
    if let Some(identity) = store.current() {
        info!("👋 {} signed out", identity.display_string());
    }
    store.logout()?;

    Ok((
        store.into_slot().into_jar(),
        Json(LogoutResponse {
            redirect: paths::LOGIN.to_string(),
        }),
    ))
}

/// Current session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "Auth",
    summary = "Current session",
    responses(
        (status = 200, description = "Session state", body = SessionResponse)
    )
)]
pub async fn current_session(
    State(state): State<AppState>,
    session: Session,
) -> Json<SessionResponse> {
    let landing = session
        .identity()
        .map(|identity| state.policy.landing_route_for(identity.role).to_string());

    Json(SessionResponse {
        authenticated: session.identity().is_some(),
        identity: session.0,
        landing,
    })
}
