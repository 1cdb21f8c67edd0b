use courier_types::{
    ConfigSnapshot, OPTION_DISABLE_DOCUMENT_FILENAMES, OPTION_DISABLE_MINITHUMBNAILS,
};

#[test]
fn absent_option_reads_false() {
    let config = ConfigSnapshot::new();
    assert!(!config.get_option_boolean(OPTION_DISABLE_DOCUMENT_FILENAMES));
    assert!(!config.get_option_boolean(OPTION_DISABLE_MINITHUMBNAILS));
    assert!(!config.get_option_boolean("some_unknown_option"));
}

#[test]
fn set_option_reads_back() {
    let config = ConfigSnapshot::new().with_option(OPTION_DISABLE_MINITHUMBNAILS, true);
    assert!(config.get_option_boolean(OPTION_DISABLE_MINITHUMBNAILS));
    assert!(!config.get_option_boolean(OPTION_DISABLE_DOCUMENT_FILENAMES));
}

#[test]
fn option_can_be_overwritten() {
    let config = ConfigSnapshot::new()
        .with_option(OPTION_DISABLE_DOCUMENT_FILENAMES, true)
        .with_option(OPTION_DISABLE_DOCUMENT_FILENAMES, false);
    assert!(!config.get_option_boolean(OPTION_DISABLE_DOCUMENT_FILENAMES));
}

#[test]
fn snapshot_serialization_roundtrip() {
    let config = ConfigSnapshot::new().with_option(OPTION_DISABLE_DOCUMENT_FILENAMES, true);
    let json = serde_json::to_string(&config).unwrap();
    let parsed: ConfigSnapshot = serde_json::from_str(&json).unwrap();
    assert!(parsed.get_option_boolean(OPTION_DISABLE_DOCUMENT_FILENAMES));
}
