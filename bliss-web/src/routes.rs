//! Route definitions for the portal web server

use crate::{handlers, openapi, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        // Session
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/session", get(handlers::current_session))
        // Guard and layout
        .route("/resolve", get(handlers::resolve_path))
        .route("/layout", get(handlers::compose_layout))
        // Community records
        .route("/dashboard", get(handlers::dashboard))
        .route("/residents", get(handlers::list_residents))
        .route("/residents/export", get(handlers::export_residents))
        .route(
            "/requests",
            get(handlers::list_requests).post(handlers::submit_request),
        )
        .route("/requests/mine", get(handlers::my_requests))
        .route(
            "/requests/{id}/status",
            put(handlers::update_request_status),
        )
        .route(
            "/payments",
            get(handlers::list_payments).post(handlers::record_payment),
        )
        .route("/payments/mine", get(handlers::my_payments))
        .route("/payments/dues", post(handlers::generate_dues))
        .route("/payments/{id}/cycle", post(handlers::cycle_payment))
        .route("/payments/{id}", delete(handlers::remove_payment))
        .route(
            "/announcements",
            get(handlers::list_announcements).post(handlers::post_announcement),
        )
        .route(
            "/emergency",
            get(handlers::list_contacts).post(handlers::add_contact),
        )
        .route("/profile", get(handlers::profile))
        // Concierge
        .route("/assistant/chat", post(handlers::assistant_chat))
        .route("/assistant/analyze-image", post(handlers::analyze_image))
}
