//! Record batch framing and bulk store replay.
//!
//! At startup each manager streams its own records back out of the local
//! store. The store hands the manager one batch per store generation: a
//! header carrying the ambient format version plus the generation id,
//! followed by one length-prefixed blob per record. Blob framing is what
//! lets replay step over a corrupt record and keep going.

use crate::{DecodeError, EntityRecordCodec, RecordReader, RecordWriter};
use courier_types::{ConfigSnapshot, EntityHandle, StoreVersion};
use tracing::{debug, warn};
use uuid::Uuid;

/// Magic bytes opening every record batch.
const BATCH_MAGIC: u32 = 0x4352_4254; // "CRBT"

/// Serializes a record batch: header, then each blob length-prefixed.
#[must_use]
pub fn write_batch(version: StoreVersion, generation: Uuid, blobs: &[Vec<u8>]) -> Vec<u8> {
    let mut writer = RecordWriter::new();
    writer.write_u32(BATCH_MAGIC);
    writer.write_u32(version.as_raw());
    writer.write_bytes(generation.as_bytes());
    writer.write_u32(blobs.len() as u32);
    for blob in blobs {
        writer.write_bytes(blob);
    }
    writer.into_bytes()
}

/// Reader over a serialized record batch.
pub struct BatchReader<'a> {
    reader: RecordReader<'a>,
    version: StoreVersion,
    generation: Uuid,
    remaining_records: u32,
}

impl<'a> BatchReader<'a> {
    /// Parses the batch header.
    ///
    /// A malformed header condemns the whole batch — without a version
    /// there is nothing to decode the records against.
    pub fn open(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        let mut reader = RecordReader::new(bytes);
        let magic = reader.read_u32("batch magic")?;
        if magic != BATCH_MAGIC {
            return Err(DecodeError::malformed(format!(
                "batch magic: expected {BATCH_MAGIC:#010x}, got {magic:#010x}"
            )));
        }
        let version = StoreVersion::from_raw(reader.read_u32("batch version")?);
        let generation_bytes = reader.read_bytes("batch generation")?;
        let generation = Uuid::from_slice(&generation_bytes)
            .map_err(|_| DecodeError::malformed("batch generation: not a uuid"))?;
        let remaining_records = reader.read_u32("batch record count")?;
        Ok(Self {
            reader,
            version,
            generation,
            remaining_records,
        })
    }

    /// The ambient format version every record in this batch was written at.
    #[must_use]
    pub fn version(&self) -> StoreVersion {
        self.version
    }

    /// The store generation this batch belongs to.
    #[must_use]
    pub fn generation(&self) -> Uuid {
        self.generation
    }

    /// Records left to read.
    #[must_use]
    pub fn remaining_records(&self) -> u32 {
        self.remaining_records
    }

    /// Reads the next record blob, or `None` once the batch is exhausted.
    pub fn next_blob(&mut self) -> Option<Result<Vec<u8>, DecodeError>> {
        if self.remaining_records == 0 {
            return None;
        }
        self.remaining_records -= 1;
        Some(self.reader.read_bytes("record blob"))
    }
}

/// Result of replaying one batch through a codec.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Canonical handles of every record that decoded successfully.
    pub restored: Vec<EntityHandle>,
    /// Number of records dropped as corrupt.
    pub skipped: usize,
}

/// Replays every record in a batch through the given codec.
///
/// Each record decodes against the batch's own ambient version and the
/// supplied configuration snapshot. A record that fails to decode is
/// logged and skipped; one corrupt record never aborts the batch. Only a
/// malformed batch header (or a truncated blob frame, which makes every
/// later frame unreadable) fails the call.
pub fn replay_batch<C: EntityRecordCodec>(
    bytes: &[u8],
    codec: &mut C,
    config: &ConfigSnapshot,
) -> Result<ReplayOutcome, DecodeError> {
    let mut batch = BatchReader::open(bytes)?;
    let version = batch.version();
    debug!(%version, generation = %batch.generation(), records = batch.remaining_records(), "replaying record batch");

    let mut outcome = ReplayOutcome::default();
    while let Some(blob) = batch.next_blob() {
        let blob = blob?;
        match codec.decode(&blob, version, config) {
            Ok(handle) => outcome.restored.push(handle),
            Err(error) => {
                warn!(%error, "dropping corrupt record during replay");
                outcome.skipped += 1;
            }
        }
    }
    Ok(outcome)
}
