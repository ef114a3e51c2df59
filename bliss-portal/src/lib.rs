//! Bliss Portal - application layer of the Bliss III community portal
//!
//! This crate holds everything that decides what a signed-in person may see
//! and what they see once they are let through:
//!
//! - **auth**: session store, role policy, route guard and mock sign-in
//! - **layout**: chrome composition (header, side and mobile navigation)
//! - **community**: in-memory residents, payments, requests and bulletins
//! - **assistant**: the seam for the AI concierge collaborator
//!
//! ## Architecture
//!
//! The auth layer is synchronous and side-effect free apart from
//! `SessionStore::login`/`logout`. Presentation crates (bliss-web, bliss-cli)
//! build a `SessionStore` over their own durable slot and hand the current
//! identity to the guard and composer explicitly.

pub mod assistant;
pub mod auth;
pub mod community;
pub mod layout;

pub use assistant::{Assistant, ConversationTurn, ImagePayload, RequestDraft, Speaker};
pub use auth::{
    paths, sign_in, Capabilities, Decision, Denial, FileSlot, Guard, Icon,
    MemorySlot, MockCredentials, NavigationEntry, Outcome, RolePolicy, RouteDescriptor,
    SessionSlot, SessionStore,
};
pub use community::{Community, DashboardSummary};
pub use layout::{Header, Layout, LayoutComposer, NavLink, Page};

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("Core error: {0}")]
    Core(#[from] bliss_core::BlissError),

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Permission error: {message}")]
    Permission { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Assistant error: {message}")]
    Assistant { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PortalResult<T> = Result<T, PortalError>;

impl PortalError {
    /// Create a session error
    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create a permission error
    pub fn permission<S: Into<String>>(message: S) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an assistant error
    pub fn assistant<S: Into<String>>(message: S) -> Self {
        Self::Assistant {
            message: message.into(),
        }
    }
}
