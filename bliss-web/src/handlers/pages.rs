//! Portal pages
//!
//! Every path outside `/api` goes through the guard. Redirects become
//! `303 See Other`; rendered paths get the server-side page shell.

use crate::auth::Session;
use crate::templates::{ErrorTemplate, LoginTemplate, PortalTemplate};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use bliss_portal::{Guard, LayoutComposer, Outcome};
use tracing::error;

fn render<T: Template>(template: T, status: StatusCode) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("❌ Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Resolve and render a portal page
pub async fn page_fallback(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
) -> Response {
    let target = match Guard::new(&state.policy).resolve(session.identity(), uri.path()) {
        Outcome::Redirect(target) => return Redirect::to(&target).into_response(),
        Outcome::Render(target) => target,
    };

    let Some(identity) = session.identity() else {
        return render(LoginTemplate::default(), StatusCode::OK);
    };

    match LayoutComposer::new(&state.policy).compose(identity, &target) {
        Some(layout) => {
            let community = state.community.read().await;
            render(PortalTemplate::new(layout, &community), StatusCode::OK)
        }
        None => {
            error!("❌ Guard rendered {} but no layout exists for it", target);
            render(
                ErrorTemplate {
                    title: "Page unavailable".to_string(),
                    error_code: 500,
                    error_message: format!("No page is registered for {}", target),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}
