//! Role Policy
//!
//! Static allow-lists mapping each role to the routes it may open, the menu
//! it sees and the page it lands on. Every route is listed explicitly per
//! role; anything missing from a role's list is denied.

use bliss_core::Role;
use serde::Serialize;
use std::collections::BTreeSet;

/// Navigable paths of the portal
pub mod paths {
    pub const LOGIN: &str = "/login";
    /// Authenticated root, always redirected to the role's landing route
    pub const ROOT: &str = "/";

    pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
    pub const ADMIN_RESIDENTS: &str = "/admin/residents";
    pub const ADMIN_REQUESTS: &str = "/admin/requests";
    pub const ADMIN_PAYMENTS: &str = "/admin/payments";

    pub const WELCOME: &str = "/welcome";
    pub const RESIDENT_PROFILE: &str = "/resident/profile";
    pub const RESIDENT_SUBMIT_REQUEST: &str = "/resident/submit-request";
    pub const RESIDENT_HISTORY: &str = "/resident/history";

    pub const ANNOUNCEMENTS: &str = "/announcements";
    pub const EMERGENCY: &str = "/emergency";
}

/// Static declaration of a path and the roles that may resolve it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RouteDescriptor {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub path: &'static str,
    pub allowed_roles: BTreeSet<Role>,
    /// Where a denied, signed-in requester ends up
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub fallback_path: &'static str,
}

impl RouteDescriptor {
    fn new(path: &'static str, roles: &[Role], fallback_path: &'static str) -> Self {
        Self {
            path,
            allowed_roles: roles.iter().copied().collect(),
            fallback_path,
        }
    }

    /// Whether `role` is on this route's allow-list
    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

/// Opaque icon reference for navigation entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    LayoutDashboard,
    Users,
    ClipboardList,
    CreditCard,
    Bell,
    PhoneCall,
    Home,
    PlusCircle,
    History,
    User,
}

impl Icon {
    /// Stable name used by templates and the JSON API
    pub fn name(&self) -> &'static str {
        match self {
            Icon::LayoutDashboard => "layout-dashboard",
            Icon::Users => "users",
            Icon::ClipboardList => "clipboard-list",
            Icon::CreditCard => "credit-card",
            Icon::Bell => "bell",
            Icon::PhoneCall => "phone-call",
            Icon::Home => "home",
            Icon::PlusCircle => "plus-circle",
            Icon::History => "history",
            Icon::User => "user",
        }
    }
}

/// One menu item; order within a role's menu is its on-screen order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NavigationEntry {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub label: &'static str,
    pub icon: Icon,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub path: &'static str,
}

const fn entry(label: &'static str, icon: Icon, path: &'static str) -> NavigationEntry {
    NavigationEntry { label, icon, path }
}

const ADMIN_NAVIGATION: [NavigationEntry; 6] = [
    entry("Dashboard", Icon::LayoutDashboard, paths::ADMIN_DASHBOARD),
    entry("Residents", Icon::Users, paths::ADMIN_RESIDENTS),
    entry("Service Queue", Icon::ClipboardList, paths::ADMIN_REQUESTS),
    entry("Payments", Icon::CreditCard, paths::ADMIN_PAYMENTS),
    entry("Announcements", Icon::Bell, paths::ANNOUNCEMENTS),
    entry("Emergency", Icon::PhoneCall, paths::EMERGENCY),
];

const RESIDENT_NAVIGATION: [NavigationEntry; 6] = [
    entry("Home", Icon::Home, paths::WELCOME),
    entry("Announcements", Icon::Bell, paths::ANNOUNCEMENTS),
    entry("Request", Icon::PlusCircle, paths::RESIDENT_SUBMIT_REQUEST),
    entry("Payments", Icon::History, paths::RESIDENT_HISTORY),
    entry("Emergency", Icon::PhoneCall, paths::EMERGENCY),
    entry("Profile", Icon::User, paths::RESIDENT_PROFILE),
];

/// Pre-computed page capabilities for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Capabilities {
    /// Create/manage controls on shared pages
    pub can_manage: bool,
}

/// Role policy holding the static route table
#[derive(Debug, Clone)]
pub struct RolePolicy {
    routes: Vec<RouteDescriptor>,
}

impl RolePolicy {
    /// The portal's route table
    pub fn standard() -> Self {
        use Role::{Admin, Resident};

        let routes = vec![
            RouteDescriptor::new(paths::ADMIN_DASHBOARD, &[Admin], paths::WELCOME),
            RouteDescriptor::new(paths::ADMIN_RESIDENTS, &[Admin], paths::WELCOME),
            RouteDescriptor::new(paths::ADMIN_REQUESTS, &[Admin], paths::WELCOME),
            RouteDescriptor::new(paths::ADMIN_PAYMENTS, &[Admin], paths::WELCOME),
            RouteDescriptor::new(paths::WELCOME, &[Resident], paths::ADMIN_DASHBOARD),
            RouteDescriptor::new(paths::RESIDENT_PROFILE, &[Resident], paths::ADMIN_DASHBOARD),
            RouteDescriptor::new(
                paths::RESIDENT_SUBMIT_REQUEST,
                &[Resident],
                paths::ADMIN_DASHBOARD,
            ),
            RouteDescriptor::new(paths::RESIDENT_HISTORY, &[Resident], paths::ADMIN_DASHBOARD),
            RouteDescriptor::new(paths::ANNOUNCEMENTS, &[Admin, Resident], paths::LOGIN),
            RouteDescriptor::new(paths::EMERGENCY, &[Admin, Resident], paths::LOGIN),
        ];

        Self { routes }
    }

    /// Every declared route
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Routes on `role`'s allow-list, in declaration order
    pub fn routes_for(&self, role: Role) -> Vec<&RouteDescriptor> {
        self.routes.iter().filter(|r| r.allows(role)).collect()
    }

    /// Exact-match lookup; there is no prefix or wildcard matching
    pub fn descriptor(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Whether `role` may render `path`; undeclared paths are denied
    pub fn permits(&self, role: Role, path: &str) -> bool {
        self.descriptor(path).is_some_and(|r| r.allows(role))
    }

    pub fn navigation_for(&self, role: Role) -> &'static [NavigationEntry] {
        match role {
            Role::Admin => &ADMIN_NAVIGATION,
            Role::Resident => &RESIDENT_NAVIGATION,
        }
    }

    pub fn landing_route_for(&self, role: Role) -> &'static str {
        match role {
            Role::Admin => paths::ADMIN_DASHBOARD,
            Role::Resident => paths::WELCOME,
        }
    }

    pub fn capabilities(&self, role: Role) -> Capabilities {
        Capabilities {
            can_manage: role == Role::Admin,
        }
    }
}

impl Default for RolePolicy {
    fn default() -> Self {
        Self::standard()
    }
}
