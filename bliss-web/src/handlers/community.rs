//! Community record handlers
//!
//! Every handler resolves the page path its data belongs to through the
//! guard first, so the API follows the same allow-lists as the pages.

use super::types::{
    AnnouncementsResponse, ContactsResponse, DuesRequest, PaymentsResponse, ResidentQuery,
    SearchQuery, StatusUpdate,
};
use crate::auth::Session;
use crate::error::ErrorResponse;
use crate::{ApiResult, AppState};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use bliss_core::{performance, Identity};
use bliss_portal::community::{
    export_csv, Announcement, EmergencyContact, NewAnnouncement, NewContact, NewRequest, Payment,
    PaymentEntry, ResidentPage, ServiceRequest,
};
use bliss_portal::{paths, DashboardSummary};
use chrono::NaiveDate;
use tracing::info;

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Headline numbers for administrators
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Community",
    summary = "Dashboard summary",
    responses(
        (status = 200, description = "Dashboard numbers", body = DashboardSummary),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Administrators only", body = ErrorResponse)
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<DashboardSummary>> {
    session.require(&state.policy, paths::ADMIN_DASHBOARD)?;
    let community = state.community.read().await;
    Ok(Json(community.dashboard()))
}

/// Search the resident directory
#[utoipa::path(
    get,
    path = "/api/residents",
    tag = "Community",
    summary = "List residents",
    params(ResidentQuery),
    responses(
        (status = 200, description = "One page of matching residents", body = ResidentPage),
        (status = 403, description = "Administrators only", body = ErrorResponse)
    )
)]
pub async fn list_residents(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ResidentQuery>,
) -> ApiResult<Json<ResidentPage>> {
    session.require(&state.policy, paths::ADMIN_RESIDENTS)?;
    let community = state.community.read().await;
    Ok(Json(community.directory.page(
        &query.q,
        query.status,
        query.page.unwrap_or(1),
    )))
}

/// Download the filtered directory as CSV
#[utoipa::path(
    get,
    path = "/api/residents/export",
    tag = "Community",
    summary = "Export residents",
    params(ResidentQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv"),
        (status = 403, description = "Administrators only", body = ErrorResponse)
    )
)]
pub async fn export_residents(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ResidentQuery>,
) -> ApiResult<impl IntoResponse> {
    let identity = session.require(&state.policy, paths::ADMIN_RESIDENTS)?;
    let community = state.community.read().await;
    let matches = community.directory.search(&query.q, query.status);
    let csv = performance::measure_sync("export_residents", || {
        export_csv(matches.iter().copied())
    });
    info!("📤 {} exported {} residents", identity.id, matches.len());

    let disposition = format!("attachment; filename=\"bliss_residents_{}.csv\"", today());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// Service queue for administrators
#[utoipa::path(
    get,
    path = "/api/requests",
    tag = "Community",
    summary = "List service requests",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching requests, newest first", body = Vec<ServiceRequest>),
        (status = 403, description = "Administrators only", body = ErrorResponse)
    )
)]
pub async fn list_requests(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<ServiceRequest>>> {
    session.require(&state.policy, paths::ADMIN_REQUESTS)?;
    let community = state.community.read().await;
    Ok(Json(
        community.queue.search(&query.q).into_iter().cloned().collect(),
    ))
}

/// Submit a request as the signed-in resident
#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "Community",
    summary = "Submit a service request",
    request_body = NewRequest,
    responses(
        (status = 201, description = "Request queued", body = ServiceRequest),
        (status = 400, description = "Missing title or description", body = ErrorResponse),
        (status = 403, description = "Residents only", body = ErrorResponse)
    )
)]
pub async fn submit_request(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<NewRequest>,
) -> ApiResult<(StatusCode, Json<ServiceRequest>)> {
    let identity = session.require(&state.policy, paths::RESIDENT_SUBMIT_REQUEST)?;
    let mut community = state.community.write().await;
    let created = community.queue.submit(&identity, request, today())?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Requests filed by the signed-in resident
#[utoipa::path(
    get,
    path = "/api/requests/mine",
    tag = "Community",
    summary = "My service requests",
    responses(
        (status = 200, description = "The caller's requests", body = Vec<ServiceRequest>),
        (status = 403, description = "Residents only", body = ErrorResponse)
    )
)]
pub async fn my_requests(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<Vec<ServiceRequest>>> {
    let identity = session.require(&state.policy, paths::RESIDENT_SUBMIT_REQUEST)?;
    let community = state.community.read().await;
    Ok(Json(
        community
            .queue
            .for_resident(&identity.id)
            .into_iter()
            .cloned()
            .collect(),
    ))
}

/// Move a request through its workflow
#[utoipa::path(
    put,
    path = "/api/requests/{id}/status",
    tag = "Community",
    summary = "Update request status",
    params(("id" = String, Path, description = "Request id, e.g. REQ-001")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Updated request", body = ServiceRequest),
        (status = 404, description = "Unknown request", body = ErrorResponse)
    )
)]
pub async fn update_request_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> ApiResult<Json<ServiceRequest>> {
    session.require(&state.policy, paths::ADMIN_REQUESTS)?;
    let mut community = state.community.write().await;
    let updated = community.queue.update_status(&id, update.status)?;
    Ok(Json(updated.clone()))
}

/// Ledger with collection statistics
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payments",
    summary = "List payments",
    params(SearchQuery),
    responses(
        (status = 200, description = "Statistics and matching records", body = PaymentsResponse),
        (status = 403, description = "Administrators only", body = ErrorResponse)
    )
)]
pub async fn list_payments(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<PaymentsResponse>> {
    session.require(&state.policy, paths::ADMIN_PAYMENTS)?;
    let community = state.community.read().await;
    Ok(Json(PaymentsResponse {
        stats: community.ledger.stats(),
        payments: community
            .ledger
            .search(&query.q)
            .into_iter()
            .cloned()
            .collect(),
    }))
}

/// Record a received payment
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payments",
    summary = "Record a payment",
    request_body = PaymentEntry,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, description = "Invalid amount or description", body = ErrorResponse),
        (status = 404, description = "Unknown resident", body = ErrorResponse)
    )
)]
pub async fn record_payment(
    State(state): State<AppState>,
    session: Session,
    Json(entry): Json<PaymentEntry>,
) -> ApiResult<(StatusCode, Json<Payment>)> {
    session.require(&state.policy, paths::ADMIN_PAYMENTS)?;
    let mut community = state.community.write().await;
    let payment = community.record_payment(entry)?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Bill every owner for the month
#[utoipa::path(
    post,
    path = "/api/payments/dues",
    tag = "Payments",
    summary = "Generate monthly dues",
    request_body = DuesRequest,
    responses(
        (status = 200, description = "Newly created dues; owners already billed are skipped", body = Vec<Payment>)
    )
)]
pub async fn generate_dues(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<DuesRequest>,
) -> ApiResult<Json<Vec<Payment>>> {
    let identity = session.require(&state.policy, paths::ADMIN_PAYMENTS)?;
    let mut community = state.community.write().await;
    let created = community.generate_dues(request.date.unwrap_or_else(today));
    info!("🧾 {} generated {} dues", identity.id, created.len());
    Ok(Json(created))
}

/// Advance a record PAID → PENDING → OVERDUE → PAID
#[utoipa::path(
    post,
    path = "/api/payments/{id}/cycle",
    tag = "Payments",
    summary = "Cycle payment status",
    params(("id" = String, Path, description = "Transaction id, e.g. TRX-1024")),
    responses(
        (status = 200, description = "Updated record", body = Payment),
        (status = 404, description = "Unknown transaction", body = ErrorResponse)
    )
)]
pub async fn cycle_payment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Json<Payment>> {
    session.require(&state.policy, paths::ADMIN_PAYMENTS)?;
    let mut community = state.community.write().await;
    let payment = community.ledger.cycle_status(&id)?;
    Ok(Json(payment.clone()))
}

/// Delete a record
#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    tag = "Payments",
    summary = "Remove a payment",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Removed record", body = Payment),
        (status = 404, description = "Unknown transaction", body = ErrorResponse)
    )
)]
pub async fn remove_payment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Json<Payment>> {
    let identity = session.require(&state.policy, paths::ADMIN_PAYMENTS)?;
    let mut community = state.community.write().await;
    let removed = community.ledger.remove(&id)?;
    info!("🗑️ {} removed payment {}", identity.id, removed.id);
    Ok(Json(removed))
}

/// Payment history of the signed-in resident
#[utoipa::path(
    get,
    path = "/api/payments/mine",
    tag = "Payments",
    summary = "My payments",
    responses(
        (status = 200, description = "The caller's records only", body = Vec<Payment>),
        (status = 403, description = "Residents only", body = ErrorResponse)
    )
)]
pub async fn my_payments(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<Vec<Payment>>> {
    let identity = session.require(&state.policy, paths::RESIDENT_HISTORY)?;
    let community = state.community.read().await;
    Ok(Json(
        community
            .ledger
            .for_resident(&identity.id)
            .into_iter()
            .cloned()
            .collect(),
    ))
}

/// Community board
#[utoipa::path(
    get,
    path = "/api/announcements",
    tag = "Bulletin",
    summary = "List announcements",
    responses(
        (status = 200, description = "Announcements, newest first", body = AnnouncementsResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn list_announcements(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<AnnouncementsResponse>> {
    let identity = session.require(&state.policy, paths::ANNOUNCEMENTS)?;
    let community = state.community.read().await;
    Ok(Json(AnnouncementsResponse {
        can_manage: state.policy.capabilities(identity.role).can_manage,
        announcements: community.bulletin.announcements().to_vec(),
    }))
}

/// Post to the community board
#[utoipa::path(
    post,
    path = "/api/announcements",
    tag = "Bulletin",
    summary = "Post an announcement",
    request_body = NewAnnouncement,
    responses(
        (status = 201, description = "Announcement posted", body = Announcement),
        (status = 403, description = "Role cannot manage the board", body = ErrorResponse)
    )
)]
pub async fn post_announcement(
    State(state): State<AppState>,
    session: Session,
    Json(announcement): Json<NewAnnouncement>,
) -> ApiResult<(StatusCode, Json<Announcement>)> {
    let identity = session.require(&state.policy, paths::ANNOUNCEMENTS)?;
    let capabilities = state.policy.capabilities(identity.role);
    let mut community = state.community.write().await;
    let posted = community
        .bulletin
        .post_announcement(capabilities, &identity, announcement, today())?;
    Ok((StatusCode::CREATED, Json(posted)))
}

/// Emergency numbers
#[utoipa::path(
    get,
    path = "/api/emergency",
    tag = "Bulletin",
    summary = "List emergency contacts",
    responses(
        (status = 200, description = "Contacts", body = ContactsResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<ContactsResponse>> {
    let identity = session.require(&state.policy, paths::EMERGENCY)?;
    let community = state.community.read().await;
    Ok(Json(ContactsResponse {
        can_manage: state.policy.capabilities(identity.role).can_manage,
        contacts: community.bulletin.contacts().to_vec(),
    }))
}

/// Add an emergency number
#[utoipa::path(
    post,
    path = "/api/emergency",
    tag = "Bulletin",
    summary = "Add an emergency contact",
    request_body = NewContact,
    responses(
        (status = 201, description = "Contact added", body = EmergencyContact),
        (status = 403, description = "Role cannot manage contacts", body = ErrorResponse)
    )
)]
pub async fn add_contact(
    State(state): State<AppState>,
    session: Session,
    Json(contact): Json<NewContact>,
) -> ApiResult<(StatusCode, Json<EmergencyContact>)> {
    let identity = session.require(&state.policy, paths::EMERGENCY)?;
    let capabilities = state.policy.capabilities(identity.role);
    let mut community = state.community.write().await;
    let added = community.bulletin.add_contact(capabilities, contact)?;
    Ok((StatusCode::CREATED, Json(added)))
}

/// Identity behind the resident profile page
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Community",
    summary = "My profile",
    responses(
        (status = 200, description = "Signed-in identity", body = Identity),
        (status = 403, description = "Residents only", body = ErrorResponse)
    )
)]
pub async fn profile(State(state): State<AppState>, session: Session) -> ApiResult<Json<Identity>> {
    Ok(Json(session.require(&state.policy, paths::RESIDENT_PROFILE)?))
}
