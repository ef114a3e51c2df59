//! HTTP request handlers for the portal web server
//!
//! This module contains all the HTTP request handlers organized by functionality.

pub mod assistant;
pub mod auth;
pub mod community;
pub mod health;
pub mod navigation;
pub mod pages;
pub mod types;

pub use assistant::*;
pub use auth::*;
pub use community::*;
pub use health::*;
pub use navigation::*;
pub use pages::*;

// Re-export all types for convenience
pub use types::*;
