//! Versioned binary record codec for Courier domain managers.
//!
//! Every domain manager persists its records through this crate's wire
//! format: one opaque blob per entity, fields in a fixed declared order,
//! variable-length data carried length-prefixed. The enclosing store — not
//! the record — carries the format version, so decoding is conditioned on
//! the ambient [`StoreVersion`](courier_types::StoreVersion) plus a
//! configuration snapshot captured at replay time.
//!
//! Decode failures are local and typed: a corrupt record is dropped, never
//! partially materialized, and bulk replay keeps going past it.

mod batch;
mod codec;
mod error;
mod wire;

pub use batch::{BatchReader, ReplayOutcome, replay_batch, write_batch};
pub use codec::EntityRecordCodec;
pub use error::DecodeError;
pub use wire::{RecordReader, RecordWriter};
