//! Runtime configuration snapshot.
//!
//! Record decoding is conditioned on a handful of boolean options. Rather
//! than querying a live configuration facade mid-parse, callers capture a
//! snapshot once and thread it through every decode — decoding stays pure
//! and independently testable even while the live configuration drifts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Suppress stored display names of media documents at decode time.
pub const OPTION_DISABLE_DOCUMENT_FILENAMES: &str = "disable_document_filenames";

/// Discard inline preview bytes at decode time.
pub const OPTION_DISABLE_MINITHUMBNAILS: &str = "disable_minithumbnails";

/// Immutable snapshot of boolean runtime options.
///
/// Options absent from the snapshot read as `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    options: HashMap<String, bool>,
}

impl ConfigSnapshot {
    /// Creates an empty snapshot (every option reads as `false`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option, builder style.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: bool) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    /// Reads a boolean option by name.
    #[must_use]
    pub fn get_option_boolean(&self, name: &str) -> bool {
        self.options.get(name).copied().unwrap_or(false)
    }
}
