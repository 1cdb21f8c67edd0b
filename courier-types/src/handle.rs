//! Entity handles and the registry that mints them.
//!
//! A handle is an opaque reference to a data entity. Handles are minted by
//! the central [`HandleRegistry`] and referenced, never owned, by domain
//! records. The registry outlives every record that mentions a handle, so
//! a handle read back from the store can always be checked against it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Opaque reference to a data entity.
///
/// Handles are comparable and hashable but carry no entity content. The
/// zero value is reserved as "no entity" and is never minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityHandle(i64);

impl EntityHandle {
    /// The canonical "no entity" handle.
    pub const INVALID: EntityHandle = EntityHandle(0);

    /// Reconstructs a handle from its raw persisted value.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw value for persistence.
    #[must_use]
    pub const fn as_raw(&self) -> i64 {
        self.0
    }

    /// Cheap local validity check: minted handles are always positive.
    ///
    /// This does not prove the handle is known to the registry — use
    /// [`HandleRegistry::is_known`] for that.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl Default for EntityHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity({})", self.0)
    }
}

/// Mints and validates entity handles.
///
/// Handles are minted monotonically. The registry can be restored from the
/// watermark persisted in the store header, so handles referenced by
/// replayed records remain known across restarts.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    last_minted: AtomicI64,
}

impl HandleRegistry {
    /// Creates an empty registry; the first minted handle is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a registry from a persisted mint watermark.
    ///
    /// Every handle up to and including the watermark is considered known.
    #[must_use]
    pub fn with_watermark(watermark: i64) -> Self {
        Self {
            last_minted: AtomicI64::new(watermark.max(0)),
        }
    }

    /// Mints a fresh handle.
    pub fn mint(&self) -> EntityHandle {
        EntityHandle(self.last_minted.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Returns true if the handle was minted by this registry (or lies
    /// under its restored watermark).
    #[must_use]
    pub fn is_known(&self, handle: EntityHandle) -> bool {
        handle.is_valid() && handle.0 <= self.last_minted.load(Ordering::Relaxed)
    }

    /// The current mint watermark, for persisting in the store header.
    #[must_use]
    pub fn watermark(&self) -> i64 {
        self.last_minted.load(Ordering::Relaxed)
    }
}
