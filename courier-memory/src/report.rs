//! The aggregate memory report.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// One manager's contribution to the aggregate report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySection {
    /// The manager's registered name.
    pub name: String,
    /// The manager's self-described payload (possibly an empty object).
    pub stats: Value,
}

/// Aggregate memory statistics across every registered manager.
///
/// Always well-formed: one named section per manager, in fixed
/// registration order, even when a manager contributes nothing. Built
/// fresh per call; it has no persistent identity.
///
/// Serializes as `{"memory_stats": {<manager_name>: {...}, ...}}` with
/// sections emitted in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryReport {
    sections: Vec<MemorySection>,
}

impl MemoryReport {
    /// A report with no sections — the well-formed "nothing to say" value.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a named section. Call order is render order.
    pub fn push_section(&mut self, name: impl Into<String>, stats: Value) {
        self.sections.push(MemorySection {
            name: name.into(),
            stats,
        });
    }

    /// Sections in registration order.
    #[must_use]
    pub fn sections(&self) -> &[MemorySection] {
        &self.sections
    }

    /// Looks up one manager's section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.stats)
    }

    /// True if no manager contributed a section.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Renders the canonical JSON envelope.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        // Serialization of this shape cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"memory_stats":{}}"#.to_string())
    }
}

impl Serialize for MemoryReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Sections<'a>(&'a [MemorySection]);

        impl Serialize for Sections<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for section in self.0 {
                    map.serialize_entry(&section.name, &section.stats)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("memory_stats", &Sections(&self.sections))?;
        map.end()
    }
}
