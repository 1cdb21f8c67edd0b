//! The memory orchestrator.
//!
//! Coordinates memory introspection and reclamation across the fixed set
//! of registered domain contexts. Every call re-evaluates the safety gate
//! from scratch (there is no cached "memory mode"), and every fan-out
//! waits for exactly the registered set before resolving, so callers never
//! observe partial completion.

use crate::{
    DomainRegistry, MemoryOpError, MemoryReport, PersistenceSettings, SessionState,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

type AllocatorTrimHook = Box<dyn Fn() + Send + Sync>;

/// Fans memory requests across every registered domain manager.
pub struct MemoryOrchestrator {
    registry: Arc<DomainRegistry>,
    session: Arc<SessionState>,
    persistence: PersistenceSettings,
    /// Optional platform hook asking the allocator to return freed pages
    /// to the operating system after a release pass.
    allocator_trim: Option<AllocatorTrimHook>,
}

impl MemoryOrchestrator {
    /// Creates an orchestrator over a coordinator-owned registry.
    #[must_use]
    pub fn new(
        registry: Arc<DomainRegistry>,
        session: Arc<SessionState>,
        persistence: PersistenceSettings,
    ) -> Self {
        Self {
            registry,
            session,
            persistence,
            allocator_trim: None,
        }
    }

    /// Installs the platform allocator-trim hook.
    ///
    /// The hook is non-functional: release resolves the same way whether
    /// or not it is installed, and nothing observes how much it frees.
    #[must_use]
    pub fn with_allocator_trim(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.allocator_trim = Some(Box::new(hook));
        self
    }

    /// True only when reclaiming caches cannot lose data: the session is
    /// authorized, the process is not shutting down, and no durable local
    /// store is enabled.
    #[must_use]
    pub fn can_manage_memory(&self) -> bool {
        if !self.session.is_authorized() || self.session.is_closing() {
            return false;
        }
        self.persistence.allows_memory_management()
    }

    /// Collects memory statistics from every registered manager.
    ///
    /// The diagnostic path is side-effect-free and always succeeds: a
    /// closed gate yields an empty but well-formed report, never an error.
    /// Sections render in registration order regardless of which manager
    /// replies first.
    pub async fn report_memory(&self, full: bool) -> MemoryReport {
        if !self.can_manage_memory() {
            return MemoryReport::empty();
        }

        let handles = self.registry.handles();
        debug!(domains = handles.len(), full, "collecting memory statistics");
        let stats = join_all(handles.iter().map(|handle| handle.report(full))).await;

        let mut report = MemoryReport::empty();
        for (handle, value) in handles.iter().zip(stats) {
            report.push_section(handle.name(), value);
        }
        report
    }

    /// Asks every registered manager to drop re-derivable cached state.
    ///
    /// Dispatches unconditionally to the whole set, in registration order,
    /// with no rollback on partial behavior — each manager's cleanup is
    /// independent and best-effort. Resolves `Ok(())` once every manager
    /// has been invoked, regardless of how much any of them actually
    /// freed.
    pub async fn release_memory(&self, full: bool) -> Result<(), MemoryOpError> {
        if !self.can_manage_memory() {
            return Err(if !self.persistence.allows_memory_management() {
                MemoryOpError::PersistenceDisallows
            } else {
                MemoryOpError::SessionDisallows
            });
        }

        let handles = self.registry.handles();
        info!(domains = handles.len(), full, "releasing memory across domains");
        join_all(handles.iter().map(|handle| handle.release(full))).await;

        if let Some(trim) = &self.allocator_trim {
            trim();
        }
        Ok(())
    }
}
