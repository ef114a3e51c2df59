//! Layout Composer
//!
//! Builds the chrome around a rendered page: header, side navigation, the
//! resident-only bottom bar, and the page selector with exactly the inputs
//! that page consumes. Only paths the guard would render get a layout.

use crate::auth::{paths, Icon, NavigationEntry, RolePolicy};
use bliss_core::{Identity, Role};
use serde::Serialize;

/// Product name shown in the header
pub const PORTAL_TITLE: &str = "Bliss III Admin Office";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub title: String,
    pub name: String,
    pub role: Role,
    pub house_number: Option<String>,
    pub avatar: Option<String>,
}

/// Navigation entry with its highlight state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NavLink {
    pub label: String,
    pub icon: Icon,
    pub path: String,
    pub active: bool,
}

impl NavLink {
    fn from_entry(entry: &NavigationEntry, current_path: &str) -> Self {
        Self {
            label: entry.label.to_string(),
            icon: entry.icon,
            path: entry.path.to_string(),
            active: entry.path == current_path,
        }
    }
}

/// Which page fills the content area, with the inputs it needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum Page {
    Dashboard { admin_name: String },
    ResidentDirectory,
    ServiceQueue,
    PaymentLedger,
    Welcome { resident_name: String },
    Profile { identity: Identity },
    SubmitRequest { resident_id: String },
    PaymentHistory { resident_id: String },
    Announcements { can_manage: bool },
    EmergencyContacts { can_manage: bool },
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard { .. } => "Dashboard",
            Page::ResidentDirectory => "Resident Directory",
            Page::ServiceQueue => "Service Queue",
            Page::PaymentLedger => "Billing & Collections",
            Page::Welcome { .. } => "Welcome",
            Page::Profile { .. } => "My Profile",
            Page::SubmitRequest { .. } => "Request Service",
            Page::PaymentHistory { .. } => "My Payments",
            Page::Announcements { .. } => "Community Board",
            Page::EmergencyContacts { .. } => "Emergency Contacts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub header: Header,
    pub side_nav: Vec<NavLink>,
    /// Bottom bar on small screens; residents only
    pub mobile_nav: Vec<NavLink>,
    pub page: Page,
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutComposer<'a> {
    policy: &'a RolePolicy,
}

impl<'a> LayoutComposer<'a> {
    pub fn new(policy: &'a RolePolicy) -> Self {
        Self { policy }
    }

    /// Compose the layout for a path the identity may render
    ///
    /// Returns `None` for anything the guard would not render.
    pub fn compose(&self, identity: &Identity, path: &str) -> Option<Layout> {
        if !self.policy.permits(identity.role, path) {
            return None;
        }

        let page = self.page_for(identity, path)?;

        let side_nav: Vec<NavLink> = self
            .policy
            .navigation_for(identity.role)
            .iter()
            .map(|entry| NavLink::from_entry(entry, path))
            .collect();

        let mobile_nav = match identity.role {
            Role::Resident => side_nav.clone(),
            Role::Admin => Vec::new(),
        };

        Some(Layout {
            header: Header {
                title: PORTAL_TITLE.to_string(),
                name: identity.name.clone(),
                role: identity.role,
                house_number: identity.house_number.clone(),
                avatar: identity.avatar.clone(),
            },
            side_nav,
            mobile_nav,
            page,
        })
    }

    fn page_for(&self, identity: &Identity, path: &str) -> Option<Page> {
        let can_manage = self.policy.capabilities(identity.role).can_manage;

        let page = match path {
            paths::ADMIN_DASHBOARD => Page::Dashboard {
                admin_name: identity.name.clone(),
            },
            paths::ADMIN_RESIDENTS => Page::ResidentDirectory,
            paths::ADMIN_REQUESTS => Page::ServiceQueue,
            paths::ADMIN_PAYMENTS => Page::PaymentLedger,
            paths::WELCOME => Page::Welcome {
                resident_name: identity.name.clone(),
            },
            paths::RESIDENT_PROFILE => Page::Profile {
                identity: identity.clone(),
            },
            paths::RESIDENT_SUBMIT_REQUEST => Page::SubmitRequest {
                resident_id: identity.id.clone(),
            },
            paths::RESIDENT_HISTORY => Page::PaymentHistory {
                resident_id: identity.id.clone(),
            },
            paths::ANNOUNCEMENTS => Page::Announcements { can_manage },
            paths::EMERGENCY => Page::EmergencyContacts { can_manage },
            _ => return None,
        };

        Some(page)
    }
}
