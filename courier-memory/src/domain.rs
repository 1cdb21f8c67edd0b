//! The managed-domain capability.

use serde_json::Value;

/// The orchestrator's only view of a domain manager.
///
/// Any subsystem owning cached entity state implements this: contacts,
/// messages, each media kind. The orchestrator never sees a concrete
/// manager type — only a fixed ordered list of this capability.
pub trait ManagedDomain: Send {
    /// Stable name used as the manager's section key in the aggregate
    /// memory report.
    fn name(&self) -> &str;

    /// Self-described memory statistics as a JSON object.
    ///
    /// A manager with nothing to report returns an empty object; the
    /// aggregate report still renders its named section so the overall
    /// shape stays uniform. `full` requests per-entity detail.
    fn report_memory(&self, full: bool) -> Value;

    /// Drops whatever cached state can be cheaply re-derived or
    /// re-fetched later through the manager's normal population path.
    ///
    /// Best-effort: the manager decides how much it can actually free,
    /// and nothing tracks which entities were dropped.
    fn release_memory(&mut self, full: bool);
}
