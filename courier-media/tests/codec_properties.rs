//! Property-based tests for the record codec.
//!
//! Verifies the round-trip guarantee over arbitrary records: decoding an
//! unchanged encoding at an unchanged version and configuration yields an
//! observably equal record.

use courier_codec::EntityRecordCodec;
use courier_media::{AudioManager, AudioTrack, Thumbnail, ThumbnailFormat};
use courier_types::{
    ConfigSnapshot, HandleRegistry, OPTION_DISABLE_MINITHUMBNAILS, StoreVersion,
};
use proptest::prelude::*;
use std::sync::Arc;

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ._-]{0,40}").unwrap()
}

fn thumbnail_strategy() -> impl Strategy<Value = Thumbnail> {
    (
        prop_oneof![
            Just(ThumbnailFormat::Jpeg),
            Just(ThumbnailFormat::Png),
            Just(ThumbnailFormat::Webp),
        ],
        0i32..4096,
        0i32..4096,
        0u32..1_000_000,
    )
        .prop_map(|(format, width, height, byte_size)| Thumbnail {
            format,
            width,
            height,
            byte_size,
        })
}

fn track_strategy() -> impl Strategy<Value = AudioTrack> {
    (
        text_strategy(),
        text_strategy(),
        0i32..100_000,
        text_strategy(),
        text_strategy(),
        prop::collection::vec(any::<u8>(), 0..256),
        thumbnail_strategy(),
    )
        .prop_map(
            |(file_name, mime_type, duration, title, performer, minithumbnail, thumbnail)| {
                AudioTrack {
                    file_name,
                    mime_type,
                    duration,
                    title,
                    performer,
                    minithumbnail,
                    thumbnail,
                    handle: courier_types::EntityHandle::INVALID, // minted per case
                }
            },
        )
}

proptest! {
    #[test]
    fn roundtrip_yields_equal_record(mut track in track_strategy()) {
        let registry = Arc::new(HandleRegistry::new());
        let mut manager = AudioManager::new(Arc::clone(&registry));
        track.handle = registry.mint();

        let bytes = manager.encode(&track);
        let handle = manager
            .decode(&bytes, StoreVersion::CURRENT, &ConfigSnapshot::new())
            .unwrap();

        prop_assert_eq!(handle, track.handle);
        prop_assert_eq!(manager.get(handle), Some(&track));
    }

    #[test]
    fn disabled_previews_only_affect_the_preview(mut track in track_strategy()) {
        let registry = Arc::new(HandleRegistry::new());
        let mut manager = AudioManager::new(Arc::clone(&registry));
        track.handle = registry.mint();

        let bytes = manager.encode(&track);
        let config = ConfigSnapshot::new().with_option(OPTION_DISABLE_MINITHUMBNAILS, true);
        let handle = manager.decode(&bytes, StoreVersion::CURRENT, &config).unwrap();

        let decoded = manager.get(handle).unwrap();
        prop_assert!(decoded.minithumbnail.is_empty());
        prop_assert_eq!(&decoded.thumbnail, &track.thumbnail);
        prop_assert_eq!(&decoded.title, &track.title);
        prop_assert_eq!(decoded.handle, track.handle);
    }

    #[test]
    fn truncation_never_registers_a_record(track in track_strategy(), cut in 1usize..24) {
        let registry = Arc::new(HandleRegistry::new());
        let mut manager = AudioManager::new(Arc::clone(&registry));
        let mut track = track;
        track.handle = registry.mint();

        let bytes = manager.encode(&track);
        let keep = bytes.len().saturating_sub(cut);
        let result = manager.decode(&bytes[..keep], StoreVersion::CURRENT, &ConfigSnapshot::new());

        prop_assert!(result.is_err());
        prop_assert_eq!(manager.tracks_count(), 0);
    }
}
