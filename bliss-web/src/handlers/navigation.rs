//! Guard and layout queries

use super::types::PathQuery;
use crate::auth::Session;
use crate::{ApiResult, AppState};
use axum::{
    extract::{Query, State},
    response::Json,
};
use bliss_portal::{Decision, Guard, Layout, LayoutComposer, PortalError};

/// Resolve a path for the caller
#[utoipa::path(
    get,
    path = "/api/resolve",
    tag = "Navigation",
    summary = "Resolve a path",
    description = "Run the route guard for the caller's session. Never fails; denials come back as redirects.",
    params(PathQuery),
    responses(
        (status = 200, description = "Guard decision", body = Decision)
    )
)]
pub async fn resolve_path(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PathQuery>,
) -> Json<Decision> {
    Json(Guard::new(&state.policy).decide(session.identity(), &query.path))
}

/// Layout of a page the caller may render
#[utoipa::path(
    get,
    path = "/api/layout",
    tag = "Navigation",
    summary = "Compose a layout",
    params(PathQuery),
    responses(
        (status = 200, description = "Header, navigation and page selector", body = Layout),
        (status = 303, description = "Signed in; `/` and `/login` continue at the landing route", body = crate::error::ErrorResponse),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse),
        (status = 403, description = "Path not available to the role", body = crate::error::ErrorResponse)
    )
)]
pub async fn compose_layout(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PathQuery>,
) -> ApiResult<Json<Layout>> {
    let identity = session.require(&state.policy, &query.path)?;
    let layout = LayoutComposer::new(&state.policy)
        .compose(&identity, &query.path)
        .ok_or_else(|| PortalError::not_found(format!("Page {}", query.path)))?;
    Ok(Json(layout))
}
