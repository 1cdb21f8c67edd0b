//! The per-entity-type record codec contract.

use crate::DecodeError;
use courier_types::{ConfigSnapshot, EntityHandle, StoreVersion};

/// Encode/decode contract implemented by every domain manager for its own
/// entity category.
///
/// `encode` is deterministic: fields in a fixed declared order, the entity
/// handle last, and never the ambient version — that belongs to the
/// enclosing store's header.
///
/// `decode` performs the full positional read, applies configuration
/// conditioning, validates the handle, then submits the rebuilt record
/// through the manager's own merge path. The handle it returns is the
/// canonical one for the logical entity, which deduplicates repeated
/// appearances of the same entity across store generations.
pub trait EntityRecordCodec {
    /// The domain record this codec understands.
    type Record;

    /// Serializes one record to an opaque byte blob.
    fn encode(&self, record: &Self::Record) -> Vec<u8>;

    /// Rebuilds a record from its byte blob and registers it with the
    /// owning manager, returning the canonical handle.
    ///
    /// Any positional read failure or an unknown handle rejects the whole
    /// record — no partial record is ever materialized.
    fn decode(
        &mut self,
        bytes: &[u8],
        ambient_version: StoreVersion,
        config: &ConfigSnapshot,
    ) -> Result<EntityHandle, DecodeError>;
}
