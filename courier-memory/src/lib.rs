//! Memory-pressure orchestration across Courier domain managers.
//!
//! Every domain manager exposes the same two-method capability,
//! [`ManagedDomain`], and runs inside its own serialized execution
//! context. The [`MemoryOrchestrator`] holds a fixed, construction-time
//! ordered registry of those contexts and fans introspection and
//! reclamation requests across all of them behind a safety gate:
//! reclaiming caches is only safe when no durable local store backs them,
//! since eviction would otherwise cause real data loss instead of a cheap
//! re-derive.

mod context;
mod domain;
mod error;
mod gate;
mod orchestrator;
mod registry;
mod report;

pub use context::DomainHandle;
pub use domain::ManagedDomain;
pub use error::MemoryOpError;
pub use gate::{PersistenceSettings, SessionState};
pub use orchestrator::MemoryOrchestrator;
pub use registry::DomainRegistry;
pub use report::{MemoryReport, MemorySection};
