//! Error types for record decoding.

use thiserror::Error;

/// Errors that can occur while decoding a persisted record.
///
/// A decode error condemns exactly one record. The record is treated as
/// wholly absent — no partial or best-effort record is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Stream underrun or a value that does not match its declared type.
    #[error("malformed record: {context}")]
    Malformed { context: String },

    /// The record's entity handle failed registry validation.
    #[error("entity handle failed registry validation")]
    InvalidHandle,
}

impl DecodeError {
    /// Shorthand for a malformed-record error with field context.
    pub fn malformed(context: impl Into<String>) -> Self {
        Self::Malformed {
            context: context.into(),
        }
    }
}
