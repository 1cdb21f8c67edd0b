//! Tests for batch framing and bulk replay.

use courier_codec::{
    BatchReader, DecodeError, EntityRecordCodec, RecordReader, RecordWriter, replay_batch,
    write_batch,
};
use courier_types::{ConfigSnapshot, EntityHandle, HandleRegistry, StoreVersion};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Minimal codec over a `{label, handle}` record, enough to drive replay.
struct LabelCodec {
    registry: Arc<HandleRegistry>,
    records: HashMap<EntityHandle, String>,
}

impl LabelCodec {
    fn new(registry: Arc<HandleRegistry>) -> Self {
        Self {
            registry,
            records: HashMap::new(),
        }
    }

    fn encode_label(label: &str, handle: EntityHandle) -> Vec<u8> {
        let mut writer = RecordWriter::new();
        writer.write_str(label);
        writer.write_i64(handle.as_raw());
        writer.into_bytes()
    }
}

impl EntityRecordCodec for LabelCodec {
    type Record = (String, EntityHandle);

    fn encode(&self, record: &Self::Record) -> Vec<u8> {
        Self::encode_label(&record.0, record.1)
    }

    fn decode(
        &mut self,
        bytes: &[u8],
        _ambient_version: StoreVersion,
        _config: &ConfigSnapshot,
    ) -> Result<EntityHandle, DecodeError> {
        let mut reader = RecordReader::new(bytes);
        let label = reader.read_str("label")?;
        let handle = EntityHandle::from_raw(reader.read_i64("handle")?);
        if !self.registry.is_known(handle) {
            return Err(DecodeError::InvalidHandle);
        }
        self.records.insert(handle, label);
        Ok(handle)
    }
}

fn registry_with_handles(count: usize) -> (Arc<HandleRegistry>, Vec<EntityHandle>) {
    let registry = Arc::new(HandleRegistry::new());
    let handles = (0..count).map(|_| registry.mint()).collect();
    (registry, handles)
}

#[test]
fn batch_header_roundtrip() {
    let generation = Uuid::new_v4();
    let bytes = write_batch(StoreVersion::CURRENT, generation, &[]);

    let batch = BatchReader::open(&bytes).unwrap();
    assert_eq!(batch.version(), StoreVersion::CURRENT);
    assert_eq!(batch.generation(), generation);
    assert_eq!(batch.remaining_records(), 0);
}

#[test]
fn bad_magic_rejects_batch() {
    let mut bytes = write_batch(StoreVersion::CURRENT, Uuid::new_v4(), &[]);
    bytes[0] ^= 0xff;
    assert!(BatchReader::open(&bytes).is_err());
}

#[test]
fn truncated_header_rejects_batch() {
    let bytes = write_batch(StoreVersion::CURRENT, Uuid::new_v4(), &[]);
    assert!(BatchReader::open(&bytes[..6]).is_err());
}

#[test]
fn replay_restores_all_records() {
    let (registry, handles) = registry_with_handles(3);
    let mut codec = LabelCodec::new(Arc::clone(&registry));

    let blobs: Vec<Vec<u8>> = handles
        .iter()
        .enumerate()
        .map(|(i, h)| LabelCodec::encode_label(&format!("record-{i}"), *h))
        .collect();
    let bytes = write_batch(StoreVersion::CURRENT, Uuid::new_v4(), &blobs);

    let outcome = replay_batch(&bytes, &mut codec, &ConfigSnapshot::new()).unwrap();
    assert_eq!(outcome.restored, handles);
    assert_eq!(outcome.skipped, 0);
    assert_eq!(codec.records.len(), 3);
}

#[test]
fn corrupt_record_is_skipped_not_fatal() {
    let (registry, handles) = registry_with_handles(2);
    let mut codec = LabelCodec::new(Arc::clone(&registry));

    let blobs = vec![
        LabelCodec::encode_label("first", handles[0]),
        vec![0xff, 0xff], // underrun mid-record
        LabelCodec::encode_label("last", handles[1]),
    ];
    let bytes = write_batch(StoreVersion::CURRENT, Uuid::new_v4(), &blobs);

    let outcome = replay_batch(&bytes, &mut codec, &ConfigSnapshot::new()).unwrap();
    assert_eq!(outcome.restored, handles);
    assert_eq!(outcome.skipped, 1);
}

#[test]
fn unknown_handle_is_skipped_not_fatal() {
    let (registry, handles) = registry_with_handles(1);
    let mut codec = LabelCodec::new(Arc::clone(&registry));

    let blobs = vec![
        LabelCodec::encode_label("stranger", EntityHandle::from_raw(777)),
        LabelCodec::encode_label("known", handles[0]),
    ];
    let bytes = write_batch(StoreVersion::CURRENT, Uuid::new_v4(), &blobs);

    let outcome = replay_batch(&bytes, &mut codec, &ConfigSnapshot::new()).unwrap();
    assert_eq!(outcome.restored, vec![handles[0]]);
    assert_eq!(outcome.skipped, 1);
}

#[test]
fn all_corrupt_records_still_complete_batch() {
    let registry = Arc::new(HandleRegistry::new());
    let mut codec = LabelCodec::new(Arc::clone(&registry));

    let blobs = vec![vec![1], vec![2, 3]];
    let bytes = write_batch(StoreVersion::CURRENT, Uuid::new_v4(), &blobs);

    let outcome = replay_batch(&bytes, &mut codec, &ConfigSnapshot::new()).unwrap();
    assert!(outcome.restored.is_empty());
    assert_eq!(outcome.skipped, 2);
}

#[test]
fn batch_preserves_ambient_version_for_decode() {
    // The codec sees the batch's version, not CURRENT.
    struct VersionProbe(Option<StoreVersion>);
    impl EntityRecordCodec for VersionProbe {
        type Record = ();
        fn encode(&self, _record: &Self::Record) -> Vec<u8> {
            Vec::new()
        }
        fn decode(
            &mut self,
            _bytes: &[u8],
            ambient_version: StoreVersion,
            _config: &ConfigSnapshot,
        ) -> Result<EntityHandle, DecodeError> {
            self.0 = Some(ambient_version);
            Ok(EntityHandle::from_raw(1))
        }
    }

    let bytes = write_batch(StoreVersion::INITIAL, Uuid::new_v4(), &[vec![]]);
    let mut probe = VersionProbe(None);
    replay_batch(&bytes, &mut probe, &ConfigSnapshot::new()).unwrap();
    assert_eq!(probe.0, Some(StoreVersion::INITIAL));
}
