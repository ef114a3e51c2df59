//! Type definitions for handlers
//!
//! This module contains all the request/response types used by the handlers.

pub mod assistant;
pub mod auth;
pub mod common;
pub mod community;

// Re-export all types for convenience
pub use assistant::*;
pub use auth::*;
pub use common::*;
pub use community::*;
