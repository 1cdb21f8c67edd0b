//! Decode-time privacy filters.
//!
//! These run while a record is being rebuilt from the store, so a privacy
//! option enabled after the record was written still masks it — historical
//! records are filtered retroactively without rewriting the store.

use courier_types::{
    ConfigSnapshot, OPTION_DISABLE_DOCUMENT_FILENAMES, OPTION_DISABLE_MINITHUMBNAILS,
};

/// Sentinel written over a suppressed display name.
pub const FILE_NAME_SUPPRESSED: &str = "0";

/// Mime prefixes whose display names are subject to suppression.
const MEDIA_MIME_PREFIXES: [&str; 3] = ["image/", "video/", "audio/"];

/// Applies display-name suppression to a freshly read file name.
pub(crate) fn filtered_file_name(raw: String, mime_type: &str, config: &ConfigSnapshot) -> String {
    let is_media = MEDIA_MIME_PREFIXES
        .iter()
        .any(|prefix| mime_type.starts_with(prefix));
    if is_media && config.get_option_boolean(OPTION_DISABLE_DOCUMENT_FILENAMES) {
        FILE_NAME_SUPPRESSED.to_string()
    } else {
        raw
    }
}

/// Decides whether consumed preview bytes are kept or discarded.
pub(crate) fn filtered_preview(consumed: Vec<u8>, config: &ConfigSnapshot) -> Vec<u8> {
    if config.get_option_boolean(OPTION_DISABLE_MINITHUMBNAILS) {
        Vec::new()
    } else {
        consumed
    }
}
