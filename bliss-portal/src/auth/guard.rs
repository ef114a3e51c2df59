//! Router guard
//!
//! Maps `(identity, path)` to a render or redirect decision. Authentication
//! is checked before authorization, so an anonymous request for a shared
//! page still goes to the login screen.

use super::policy::{paths, RolePolicy};
use bliss_core::{Identity, Role};
use serde::Serialize;
use tracing::debug;

/// Result of resolving a navigation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum Outcome {
    /// Show the page at this path
    Render(String),
    /// Navigate to this path instead
    Redirect(String),
}

impl Outcome {
    pub fn path(&self) -> &str {
        match self {
            Outcome::Render(path) | Outcome::Redirect(path) => path,
        }
    }

    pub fn is_render(&self) -> bool {
        matches!(self, Outcome::Render(_))
    }
}

/// Why a request was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum Denial {
    /// No identity, redirected to login
    Unauthenticated,
    /// Path is not on the role's allow-list
    Unauthorized { role: Role },
}

/// Outcome plus the denial reason, if any
///
/// Routine redirects (`/` and `/login` while signed in) carry no denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Decision {
    pub outcome: Outcome,
    pub denial: Option<Denial>,
}

impl Decision {
    fn allow(outcome: Outcome) -> Self {
        Self {
            outcome,
            denial: None,
        }
    }

    fn deny(outcome: Outcome, denial: Denial) -> Self {
        Self {
            outcome,
            denial: Some(denial),
        }
    }
}

/// Stateless guard over a role policy
#[derive(Debug, Clone, Copy)]
pub struct Guard<'a> {
    policy: &'a RolePolicy,
}

impl<'a> Guard<'a> {
    pub fn new(policy: &'a RolePolicy) -> Self {
        Self { policy }
    }

    /// Resolve a navigation request
    pub fn resolve(&self, identity: Option<&Identity>, path: &str) -> Outcome {
        self.decide(identity, path).outcome
    }

    /// Resolve a navigation request and report why it was denied
    pub fn decide(&self, identity: Option<&Identity>, path: &str) -> Decision {
        let Some(identity) = identity else {
            if path == paths::LOGIN {
                return Decision::allow(Outcome::Render(paths::LOGIN.to_string()));
            }
            debug!(path, "Unauthenticated request redirected to login");
            return Decision::deny(
                Outcome::Redirect(paths::LOGIN.to_string()),
                Denial::Unauthenticated,
            );
        };

        let role = identity.role;
        let landing = self.policy.landing_route_for(role);

        if path == paths::ROOT || path == paths::LOGIN {
            return Decision::allow(Outcome::Redirect(landing.to_string()));
        }

        if self.policy.permits(role, path) {
            Decision::allow(Outcome::Render(path.to_string()))
        } else {
            debug!(
                path,
                role = %role,
                user_id = %identity.id,
                "Unauthorized request redirected to landing route"
            );
            Decision::deny(
                Outcome::Redirect(landing.to_string()),
                Denial::Unauthorized { role },
            )
        }
    }
}
