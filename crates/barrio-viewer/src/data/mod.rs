// src/data/mod.rs
//! Feature sourcing for the viewer.
//!
//! This module provides:
//! - The polymorphic source configuration and its uniform load contract.
//! - The load-state machine gating what the maps may render.

pub mod source;

// Re-export commonly used types for convenience.
pub use self::source::{LoadState, SourceConfig, SourceError};
