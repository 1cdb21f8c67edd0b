//! The domain registry.
//!
//! Built once by the top-level coordinator at startup, then shared
//! read-only. Registration order is the order every fan-out and every
//! aggregate report uses; it never changes after construction. The
//! coordinator owns the registry and tears contexts down with explicit
//! shutdown calls — managers never hold a reference back to the
//! orchestrator, so there is no cycle to break.

use crate::{DomainHandle, ManagedDomain};

/// Fixed ordered set of registered domain contexts.
#[derive(Debug, Default)]
pub struct DomainRegistry {
    handles: Vec<DomainHandle>,
}

impl DomainRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a serialized context for `domain` and appends it to the
    /// registration order.
    pub fn register(&mut self, domain: impl ManagedDomain + 'static) {
        self.handles.push(DomainHandle::spawn(domain));
    }

    /// Appends an already-spawned context.
    pub fn register_handle(&mut self, handle: DomainHandle) {
        self.handles.push(handle);
    }

    /// Registered contexts, in registration order.
    #[must_use]
    pub fn handles(&self) -> &[DomainHandle] {
        &self.handles
    }

    /// Number of registered domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Requests teardown of every context, in registration order.
    pub async fn shutdown(&self) {
        for handle in &self.handles {
            handle.shutdown().await;
        }
    }
}
