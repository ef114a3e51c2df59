//! Bliss Core - shared data structures for the Bliss III community portal
//!
//! This crate holds the pieces every other crate leans on: the identity and
//! role types, the error system, logging setup and configuration loading.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
