//! Error types for memory operations.

use thiserror::Error;

/// Application-level code carried by every memory-operation error.
const MEMORY_OP_ERROR_CODE: u32 = 405;

/// Why a memory operation was refused.
///
/// Neither variant is worth retrying as-is: the caller has to change the
/// session's persistence configuration or its authorization state first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryOpError {
    /// A durable local store is enabled, so evicting caches would lose
    /// data. Actionable: disable local persistence, then retry.
    #[error(
        "MEMORY_RELEASE_DISALLOWED: session settings don't allow memory optimization; \
         disable all local stores to optimize memory"
    )]
    PersistenceDisallows,

    /// The session is not authorized or the process is shutting down.
    #[error("can't manage memory now: session unauthorized or closing")]
    SessionDisallows,
}

impl MemoryOpError {
    /// The fixed application-level error code.
    #[must_use]
    pub fn code(&self) -> u32 {
        MEMORY_OP_ERROR_CODE
    }

    /// Machine-distinguishable reason string.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::PersistenceDisallows => "MEMORY_RELEASE_DISALLOWED",
            Self::SessionDisallows => "SESSION_DISALLOWED",
        }
    }
}
