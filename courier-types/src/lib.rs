//! Core type definitions for Courier.
//!
//! This crate defines the fundamental, domain-agnostic types used throughout
//! the client core:
//! - Entity handles and the registry that mints and validates them
//! - The runtime configuration snapshot threaded through record decoding
//! - Store format versions (the "ambient version" of the enclosing store)
//! - The comparable subscription plan option
//!
//! All domain-specific record types (audio tracks, contacts, messages, etc.)
//! belong to their respective domain managers, not here.

mod config;
mod handle;
mod pricing;
mod version;

pub use config::{ConfigSnapshot, OPTION_DISABLE_DOCUMENT_FILENAMES, OPTION_DISABLE_MINITHUMBNAILS};
pub use handle::{EntityHandle, HandleRegistry};
pub use pricing::PlanOption;
pub use version::StoreVersion;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid plan option: {0}")]
    InvalidPlanOption(String),
}
