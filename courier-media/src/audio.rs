//! The audio-track domain manager.

use crate::Thumbnail;
use crate::privacy::{filtered_file_name, filtered_preview};
use courier_codec::{DecodeError, EntityRecordCodec, RecordReader, RecordWriter};
use courier_memory::ManagedDomain;
use courier_types::{ConfigSnapshot, EntityHandle, HandleRegistry, StoreVersion};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// One audio track known to the client.
///
/// Field declaration order is wire order; the handle is always last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioTrack {
    pub file_name: String,
    pub mime_type: String,
    /// Playback length in seconds.
    pub duration: i32,
    pub title: String,
    pub performer: String,
    /// Inline preview bytes; empty means no preview.
    pub minithumbnail: Vec<u8>,
    pub thumbnail: Thumbnail,
    pub handle: EntityHandle,
}

/// Authoritative owner of all in-memory audio-track records.
///
/// Records are retrievable only by handle; the handle-to-record mapping
/// is unique and insertion order carries no meaning.
pub struct AudioManager {
    registry: Arc<HandleRegistry>,
    tracks: HashMap<EntityHandle, AudioTrack>,
}

impl AudioManager {
    /// Creates an empty manager sharing the runtime's handle registry.
    #[must_use]
    pub fn new(registry: Arc<HandleRegistry>) -> Self {
        Self {
            registry,
            tracks: HashMap::new(),
        }
    }

    /// Looks up a track by its handle.
    #[must_use]
    pub fn get(&self, handle: EntityHandle) -> Option<&AudioTrack> {
        self.tracks.get(&handle)
    }

    /// Number of cached tracks.
    #[must_use]
    pub fn tracks_count(&self) -> usize {
        self.tracks.len()
    }

    /// Merge/registration path for every track observation — network or
    /// store replay.
    ///
    /// Deduplicates by handle: a repeated appearance of the same entity
    /// merges into the existing record (fresh non-empty fields win, and an
    /// absent preview never clobbers a present one) and yields the
    /// canonical handle, so store generations converge to one in-memory
    /// instance.
    pub fn register_track(&mut self, track: AudioTrack) -> EntityHandle {
        let handle = track.handle;
        match self.tracks.get_mut(&handle) {
            Some(existing) => {
                debug!(%handle, "merging repeated audio track");
                merge_track(existing, track);
            }
            None => {
                self.tracks.insert(handle, track);
            }
        }
        handle
    }
}

fn merge_track(existing: &mut AudioTrack, fresh: AudioTrack) {
    if !fresh.file_name.is_empty() {
        existing.file_name = fresh.file_name;
    }
    if !fresh.mime_type.is_empty() {
        existing.mime_type = fresh.mime_type;
    }
    if fresh.duration != 0 {
        existing.duration = fresh.duration;
    }
    if !fresh.title.is_empty() {
        existing.title = fresh.title;
    }
    if !fresh.performer.is_empty() {
        existing.performer = fresh.performer;
    }
    if !fresh.minithumbnail.is_empty() {
        existing.minithumbnail = fresh.minithumbnail;
    }
    if fresh.thumbnail != Thumbnail::default() {
        existing.thumbnail = fresh.thumbnail;
    }
}

impl EntityRecordCodec for AudioManager {
    type Record = AudioTrack;

    fn encode(&self, track: &AudioTrack) -> Vec<u8> {
        let mut writer = RecordWriter::new();
        writer.write_str(&track.file_name);
        writer.write_str(&track.mime_type);
        writer.write_i32(track.duration);
        writer.write_str(&track.title);
        writer.write_str(&track.performer);
        writer.write_bytes(&track.minithumbnail);
        track.thumbnail.write(&mut writer);
        writer.write_i64(track.handle.as_raw());
        writer.into_bytes()
    }

    fn decode(
        &mut self,
        bytes: &[u8],
        ambient_version: StoreVersion,
        config: &ConfigSnapshot,
    ) -> Result<EntityHandle, DecodeError> {
        let mut reader = RecordReader::new(bytes);
        let mut track = AudioTrack::default();

        let raw_file_name = reader.read_str("audio file name")?;
        track.mime_type = reader.read_str("audio mime type")?;
        track.file_name = filtered_file_name(raw_file_name, &track.mime_type, config);

        track.duration = reader.read_i32("audio duration")?;
        track.title = reader.read_str("audio title")?;
        track.performer = reader.read_str("audio performer")?;

        if ambient_version.supports_previews() {
            // Bytes are consumed either way to keep the stream position
            // correct; materialization is what the option controls.
            let consumed = reader.read_bytes("audio preview")?;
            track.minithumbnail = filtered_preview(consumed, config);
        }

        track.thumbnail = Thumbnail::read(&mut reader)?;
        track.handle = EntityHandle::from_raw(reader.read_i64("audio handle")?);
        if !self.registry.is_known(track.handle) {
            return Err(DecodeError::InvalidHandle);
        }

        Ok(self.register_track(track))
    }
}

impl ManagedDomain for AudioManager {
    fn name(&self) -> &str {
        "audio_manager"
    }

    fn report_memory(&self, full: bool) -> Value {
        let preview_bytes: usize = self.tracks.values().map(|t| t.minithumbnail.len()).sum();
        let mut stats = json!({
            "tracks_count": self.tracks.len(),
            "preview_bytes": preview_bytes,
        });
        if full {
            let mut handles: Vec<i64> = self.tracks.keys().map(EntityHandle::as_raw).collect();
            handles.sort_unstable();
            stats["handles"] = json!(handles);
        }
        stats
    }

    fn release_memory(&mut self, _full: bool) {
        debug!(dropped = self.tracks.len(), "audio manager releasing cached tracks");
        self.tracks.clear();
    }
}
