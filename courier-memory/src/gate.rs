//! Inputs to the memory-management safety gate.

use std::sync::atomic::{AtomicBool, Ordering};

/// Authorization and shutdown flags shared with the session subsystem.
///
/// The session layer flips these; the orchestrator only ever reads them,
/// freshly on every call.
#[derive(Debug, Default)]
pub struct SessionState {
    authorized: AtomicBool,
    closing: AtomicBool,
}

impl SessionState {
    /// Creates a state that is neither authorized nor closing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the session is fully authorized.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::Acquire)
    }

    /// True once process shutdown has begun.
    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.closing.load(Ordering::Acquire)
    }

    /// Marks the session authorized (or not).
    pub fn set_authorized(&self, authorized: bool) {
        self.authorized.store(authorized, Ordering::Release);
    }

    /// Marks shutdown as started.
    pub fn set_closing(&self, closing: bool) {
        self.closing.store(closing, Ordering::Release);
    }
}

/// Which durable local stores this session was started with.
///
/// Fixed at startup. Any enabled store disables memory management
/// outright: evicting a cache that a durable store backs loses data
/// rather than forcing a cheap re-derive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistenceSettings {
    /// Message history is persisted locally.
    pub use_message_store: bool,
    /// Profile/contact data is persisted locally.
    pub use_contact_store: bool,
    /// File metadata is persisted locally.
    pub use_file_store: bool,
}

impl PersistenceSettings {
    /// Settings with every local store disabled.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// True when no durable local store is enabled.
    #[must_use]
    pub fn allows_memory_management(&self) -> bool {
        !(self.use_message_store || self.use_contact_store || self.use_file_store)
    }
}
