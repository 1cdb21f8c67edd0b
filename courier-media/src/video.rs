//! The video-track domain manager.
//!
//! Video records carry a leading flags word (newer than the audio format)
//! and a flag-conditional trailing field, so this manager exercises both
//! evolution mechanisms: version-gated fields and flag-gated fields.

use crate::Thumbnail;
use crate::privacy::{filtered_file_name, filtered_preview};
use courier_codec::{DecodeError, EntityRecordCodec, RecordReader, RecordWriter};
use courier_memory::ManagedDomain;
use courier_types::{ConfigSnapshot, EntityHandle, HandleRegistry, StoreVersion};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const FLAG_SUPPORTS_STREAMING: u32 = 1 << 0;
const FLAG_HAS_ANIMATED_THUMBNAIL: u32 = 1 << 1;
const KNOWN_FLAGS: u32 = FLAG_SUPPORTS_STREAMING | FLAG_HAS_ANIMATED_THUMBNAIL;

/// One video track known to the client.
///
/// Field declaration order is wire order; the handle is last, except the
/// flag-conditional animated thumbnail which trails it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoTrack {
    pub supports_streaming: bool,
    pub file_name: String,
    pub mime_type: String,
    /// Playback length in seconds.
    pub duration: i32,
    pub width: i32,
    pub height: i32,
    /// Inline preview bytes; empty means no preview.
    pub minithumbnail: Vec<u8>,
    pub thumbnail: Thumbnail,
    pub animated_thumbnail: Option<Thumbnail>,
    pub handle: EntityHandle,
}

/// Authoritative owner of all in-memory video-track records.
pub struct VideoManager {
    registry: Arc<HandleRegistry>,
    tracks: HashMap<EntityHandle, VideoTrack>,
}

impl VideoManager {
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
    pub fn get(&self, handle: EntityHandle) -> Option<&VideoTrack> {
        self.tracks.get(&handle)
    }

    /// Number of cached tracks.
    #[must_use]
    pub fn tracks_count(&self) -> usize {
        self.tracks.len()
    }

    /// Merge/registration path; dedup and canonicalization by handle, as
    /// for audio.
    pub fn register_track(&mut self, track: VideoTrack) -> EntityHandle {
        let handle = track.handle;
        match self.tracks.get_mut(&handle) {
            Some(existing) => {
                debug!(%handle, "merging repeated video track");
                merge_track(existing, track);
            }
            None => {
                self.tracks.insert(handle, track);
            }
        }
        handle
    }
}

fn merge_track(existing: &mut VideoTrack, fresh: VideoTrack) {
    existing.supports_streaming = fresh.supports_streaming;
    if !fresh.file_name.is_empty() {
        existing.file_name = fresh.file_name;
    }
    if !fresh.mime_type.is_empty() {
        existing.mime_type = fresh.mime_type;
    }
    if fresh.duration != 0 {
        existing.duration = fresh.duration;
    }
    if fresh.width != 0 {
        existing.width = fresh.width;
    }
    if fresh.height != 0 {
        existing.height = fresh.height;
    }
    if !fresh.minithumbnail.is_empty() {
        existing.minithumbnail = fresh.minithumbnail;
    }
    if fresh.thumbnail != Thumbnail::default() {
        existing.thumbnail = fresh.thumbnail;
    }
    if fresh.animated_thumbnail.is_some() {
        existing.animated_thumbnail = fresh.animated_thumbnail;
    }
}

impl EntityRecordCodec for VideoManager {
    type Record = VideoTrack;

    fn encode(&self, track: &VideoTrack) -> Vec<u8> {
        let mut flags = 0;
        if track.supports_streaming {
            flags |= FLAG_SUPPORTS_STREAMING;
        }
        if track.animated_thumbnail.is_some() {
            flags |= FLAG_HAS_ANIMATED_THUMBNAIL;
        }

        let mut writer = RecordWriter::new();
        writer.write_u32(flags);
        writer.write_str(&track.file_name);
        writer.write_str(&track.mime_type);
        writer.write_i32(track.duration);
        writer.write_i32(track.width);
        writer.write_i32(track.height);
        writer.write_bytes(&track.minithumbnail);
        track.thumbnail.write(&mut writer);
        writer.write_i64(track.handle.as_raw());
        if let Some(animated) = &track.animated_thumbnail {
            animated.write(&mut writer);
        }
        writer.into_bytes()
    }

    fn decode(
        &mut self,
        bytes: &[u8],
        ambient_version: StoreVersion,
        config: &ConfigSnapshot,
    ) -> Result<EntityHandle, DecodeError> {
        let mut reader = RecordReader::new(bytes);
        let mut track = VideoTrack::default();

        let mut has_animated_thumbnail = false;
        if ambient_version >= StoreVersion::ADDS_TRACK_FLAGS {
            let flags = reader.read_u32("video flags")?;
            if flags & !KNOWN_FLAGS != 0 {
                return Err(DecodeError::malformed(format!(
                    "video flags: unknown bits {:#x}",
                    flags & !KNOWN_FLAGS
                )));
            }
            track.supports_streaming = flags & FLAG_SUPPORTS_STREAMING != 0;
            has_animated_thumbnail = flags & FLAG_HAS_ANIMATED_THUMBNAIL != 0;
        }

        let raw_file_name = reader.read_str("video file name")?;
        track.mime_type = reader.read_str("video mime type")?;
        track.file_name = filtered_file_name(raw_file_name, &track.mime_type, config);

        track.duration = reader.read_i32("video duration")?;
        track.width = reader.read_i32("video width")?;
        track.height = reader.read_i32("video height")?;

        if ambient_version.supports_previews() {
            let consumed = reader.read_bytes("video preview")?;
            track.minithumbnail = filtered_preview(consumed, config);
        }

        track.thumbnail = Thumbnail::read(&mut reader)?;
        track.handle = EntityHandle::from_raw(reader.read_i64("video handle")?);
        if has_animated_thumbnail {
            track.animated_thumbnail = Some(Thumbnail::read(&mut reader)?);
        }
        if !self.registry.is_known(track.handle) {
            return Err(DecodeError::InvalidHandle);
        }

        Ok(self.register_track(track))
    }
}

impl ManagedDomain for VideoManager {
    fn name(&self) -> &str {
        "video_manager"
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
        debug!(dropped = self.tracks.len(), "video manager releasing cached tracks");
        self.tracks.clear();
    }
}
