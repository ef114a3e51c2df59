//! OpenAPI specification for the portal API

use axum::response::Json;
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::{
    AnalyzeImageRequest, AnnouncementsResponse, ChatRequest, ChatResponse, ContactsResponse,
    DuesRequest, HealthResponse, LoginRequest, LoginResponse, LogoutResponse, PaymentsResponse,
    SessionResponse, StatusUpdate,
};
use bliss_core::{Identity, Role};
use bliss_portal::community::{
    Announcement, AnnouncementCategory, ContactCategory, DirectoryStats, EmergencyContact,
    LedgerStats, NewAnnouncement, NewContact, NewRequest, Payment, PaymentEntry, PaymentStatus,
    RequestCategory, RequestStatus, Resident, ResidentPage, ResidentStatus, ResidentType,
    ServiceRequest,
};
use bliss_portal::{
    ConversationTurn, DashboardSummary, Decision, Denial, Header, Icon, ImagePayload, Layout,
    NavLink, Outcome, Page, RequestDraft, Speaker,
};

/// Main OpenAPI specification for the portal
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bliss III Portal API",
        version = "0.1.0",
        description = "Community administration portal: residents, service requests, payments and bulletins"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Health
        crate::handlers::health_check,

        // Session
        crate::handlers::login,
        crate::handlers::logout,
        crate::handlers::current_session,

        // Navigation
        crate::handlers::resolve_path,
        crate::handlers::compose_layout,

        // Community
        crate::handlers::dashboard,
        crate::handlers::list_residents,
        crate::handlers::export_residents,
        crate::handlers::list_requests,
        crate::handlers::submit_request,
        crate::handlers::my_requests,
        crate::handlers::update_request_status,
        crate::handlers::profile,

        // Payments
        crate::handlers::list_payments,
        crate::handlers::record_payment,
        crate::handlers::generate_dues,
        crate::handlers::cycle_payment,
        crate::handlers::remove_payment,
        crate::handlers::my_payments,

        // Bulletin
        crate::handlers::list_announcements,
        crate::handlers::post_announcement,
        crate::handlers::list_contacts,
        crate::handlers::add_contact,

        // Assistant
        crate::handlers::assistant_chat,
        crate::handlers::analyze_image,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            LoginRequest,
            LoginResponse,
            LogoutResponse,
            SessionResponse,
            Identity,
            Role,
            Decision,
            Outcome,
            Denial,
            Layout,
            Header,
            NavLink,
            Icon,
            Page,
            DashboardSummary,
            Resident,
            ResidentType,
            ResidentStatus,
            ResidentPage,
            DirectoryStats,
            ServiceRequest,
            RequestStatus,
            RequestCategory,
            NewRequest,
            StatusUpdate,
            Payment,
            PaymentStatus,
            PaymentEntry,
            PaymentsResponse,
            LedgerStats,
            DuesRequest,
            Announcement,
            AnnouncementCategory,
            NewAnnouncement,
            AnnouncementsResponse,
            EmergencyContact,
            ContactCategory,
            NewContact,
            ContactsResponse,
            ChatRequest,
            ChatResponse,
            ConversationTurn,
            Speaker,
            AnalyzeImageRequest,
            ImagePayload,
            RequestDraft,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Mock sign-in and session cookie"),
        (name = "Navigation", description = "Route guard and layout composition"),
        (name = "Community", description = "Residents, service requests and profile"),
        (name = "Payments", description = "Billing and collections"),
        (name = "Bulletin", description = "Announcements and emergency contacts"),
        (name = "Assistant", description = "AI concierge"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
