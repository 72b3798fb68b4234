//! Core types and error handling for netviz.
//!
//! This module hosts the crate-wide error taxonomy. The split between soft
//! per-module resolution failures (warnings, never raised) and hard
//! context-level failures (typed [`NetvizError`] values) is documented in
//! [`error`].

pub mod error;

pub use error::{ErrorContext, NetvizError, user_friendly_error};

/// Convenient result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetvizError>;
