//! End-to-end codec and store tests.
//!
//! Exercise the public API the way the CLI does: encode a profile, put it on
//! disk, find it again through the default locations, and make sure nothing
//! sensitive leaks along the way.

use scanprofile_integration_tests::{codec_for, fixed_key, locations_under, random_codec};
use scanprofile_secrets::{FileProfileStore, Profile, ProfileError, ProfileStore};
use tempfile::TempDir;

fn profile() -> Profile {
    Profile::new("scan1.example.net", "admin", "correct horse battery staple")
}

#[test]
fn test_text_survives_copy_between_codecs_with_same_key() {
    let writer = codec_for("alice", fixed_key(7));
    let reader = codec_for("alice", fixed_key(7));

    let text = writer.encode(&profile()).unwrap();
    assert_eq!(reader.decode(&text).unwrap(), profile());
}

#[test]
fn test_text_is_bound_to_user() {
    let alice = codec_for("alice", fixed_key(7));
    let bob = codec_for("bob", fixed_key(7));

    let text = alice.encode(&profile()).unwrap();
    assert!(matches!(
        bob.decode(&text),
        Err(ProfileError::ProtectionFailure(_))
    ));
}

#[test]
fn test_text_is_bound_to_key() {
    let text = codec_for("alice", fixed_key(7)).encode(&profile()).unwrap();
    assert!(codec_for("alice", fixed_key(8)).decode(&text).is_err());
}

#[test]
fn test_encodings_are_unlinkable() {
    let codec = random_codec("alice");
    let first = codec.encode(&profile()).unwrap();
    let second = codec.encode(&profile()).unwrap();

    assert_ne!(first, second);
    assert_eq!(codec.decode(&first).unwrap(), codec.decode(&second).unwrap());
}

#[tokio::test]
async fn test_save_then_find_default() {
    let tmp = TempDir::new().unwrap();
    let locations = locations_under(
        tmp.path(),
        &["cwd/scan.profile.txt", "config/scan.profile.txt", "docs/scan.profile.txt"],
    );
    let store = FileProfileStore::new(codec_for("alice", fixed_key(1)), locations.clone());

    store.save(&locations[1], &profile()).await.unwrap();

    let found = store.find_default().await.unwrap();
    assert_eq!(found.path, locations[1]);
    assert_eq!(found.profile, profile());
}

#[tokio::test]
async fn test_find_default_prefers_earlier_location() {
    let tmp = TempDir::new().unwrap();
    let locations = locations_under(tmp.path(), &["first.txt", "second.txt"]);
    let store = FileProfileStore::new(codec_for("alice", fixed_key(1)), locations.clone());

    let later = Profile::new("scan2", "ops", "pw").with_port(443);
    store.save(&locations[1], &later).await.unwrap();
    store.save(&locations[0], &profile()).await.unwrap();

    let found = store.find_default().await.unwrap();
    assert_eq!(found.path, locations[0]);
}

#[tokio::test]
async fn test_profile_file_never_contains_password() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("scan.profile.txt");
    let store = FileProfileStore::new(random_codec("alice"), Vec::new());

    store.save(&path, &profile()).await.unwrap();

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(!content.contains("correct horse"));
    assert!(!content.contains("admin"));
}

#[tokio::test]
async fn test_validation_report_for_foreign_profile() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("scan.profile.txt");

    FileProfileStore::new(codec_for("bob", fixed_key(3)), Vec::new())
        .save(&path, &profile())
        .await
        .unwrap();

    let store = FileProfileStore::new(codec_for("alice", fixed_key(3)), Vec::new());
    let report = store.validate(Some(&path)).await;

    assert!(!report.is_ok());
    assert_eq!(report.server, "Unable to read");
    assert!(!report.status.contains("correct horse"));
}

#[tokio::test]
async fn test_validation_report_ok() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("scan.profile.txt");
    let store = FileProfileStore::new(random_codec("alice"), vec![path.clone()]);

    store.save(&path, &profile().with_port(8443)).await.unwrap();

    let report = store.validate(None).await;
    assert!(report.is_ok());
    assert_eq!(report.server, "scan1.example.net:8443");
    assert_eq!(report.status, "OK");
}
