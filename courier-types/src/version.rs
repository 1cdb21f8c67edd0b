//! Store format versions.
//!
//! The store carries one format version in its header — records never embed
//! it themselves. At decode time the version determines which optional
//! fields are physically present in a record's byte stream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The ambient format version of an enclosing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreVersion(u32);

impl StoreVersion {
    /// First shipped store format.
    pub const INITIAL: StoreVersion = StoreVersion(1);

    /// Media records gained a leading flags word.
    pub const ADDS_TRACK_FLAGS: StoreVersion = StoreVersion(3);

    /// Media records gained an inline preview field.
    pub const SUPPORTS_PREVIEWS: StoreVersion = StoreVersion(4);

    /// The version written by this build.
    pub const CURRENT: StoreVersion = StoreVersion(4);

    /// Reconstructs a version from its raw persisted value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value for persistence.
    #[must_use]
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// True if records at this version carry the inline preview field.
    #[must_use]
    pub const fn supports_previews(&self) -> bool {
        self.0 >= Self::SUPPORTS_PREVIEWS.0
    }
}

impl Default for StoreVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for StoreVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
