//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration can be serialized, written to disk,
//! and loaded back with identical field values, and that the loaded values
//! drive the codec and default search locations.

use scanprofile_core::config::Config;
use scanprofile_secrets::CodecOptions;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scanprofile.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scanprofile.json5");

    let mut config = Config::default();
    config.codec.entropy_min = 64;
    config.codec.entropy_max = 128;
    config.profiles.search_paths.push("/srv/scan/profile.txt".to_string());
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.codec.entropy_min, 64);
    assert_eq!(loaded.codec.entropy_max, 128);
    assert_eq!(
        loaded.profile_locations().last().unwrap(),
        Path::new("/srv/scan/profile.txt")
    );

    let options = CodecOptions::from(&loaded.codec);
    assert_eq!(options.entropy.min, 64);
    assert_eq!(options.entropy.max, 128);
}

#[test]
fn test_config_load_json5_syntax() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scanprofile.json5");
    std::fs::write(
        &path,
        r#"{
            // comments and trailing commas are allowed
            profiles: { defaultFileName: "nessus.profile.txt", },
        }"#,
    )
    .unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.profiles.default_file_name, "nessus.profile.txt");
    assert!(loaded.profile_locations()[0].ends_with("nessus.profile.txt"));
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/scanprofile.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}

#[test]
fn test_config_load_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scanprofile.json5");
    std::fs::write(&path, r#"{ profiles: { defaultFileName: "a/b.txt" } }"#).unwrap();

    assert!(Config::load(&path).is_err());
}
