//! Authentication and Authorization Module
//!
//! Everything that decides whether a navigation request is rendered or
//! redirected:
//! - `session`: the current identity and its durable slot
//! - `policy`: per-role allow-lists, navigation menus and landing routes
//! - `guard`: the pure `resolve(identity, path) -> Outcome` function
//! - `identity`: credential-free mock sign-in

pub mod guard;
pub mod identity;
pub mod policy;
pub mod session;

pub use guard::{Decision, Denial, Guard, Outcome};
pub use identity::{sign_in, MockCredentials};
pub use policy::{paths, Capabilities, Icon, NavigationEntry, RolePolicy, RouteDescriptor};
pub use session::{FileSlot, MemorySlot, SessionSlot, SessionStore};
