//! Profile storage backends.
//!
//! Defines the [`ProfileStore`] trait and provides [`FileProfileStore`], which
//! keeps each protected profile as a single line of base64 text in its own
//! file. Callers pick the path; when they don't, the default locations are
//! searched in order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use scanprofile_core::{paths, Config};
use tracing::{debug, warn};

use crate::codec::{CodecOptions, ProfileCodec};
use crate::error::{ProfileError, Result};
use crate::provider::LocalKeyProvider;
use crate::types::{DefaultProfile, Profile, ValidationReport};

/// Async trait for profile storage backends.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Protect a profile and write it to `path`.
    async fn save(&self, path: &Path, profile: &Profile) -> Result<()>;

    /// Read and decode the profile at `path`.
    async fn load(&self, path: &Path) -> Result<Profile>;

    /// Check whether a profile file exists at `path`.
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Delete the profile at `path`.
    async fn delete(&self, path: &Path) -> Result<()>;

    /// Return the first profile in the default locations that decodes.
    async fn find_default(&self) -> Result<DefaultProfile>;
}

/// A file-system-backed profile store.
///
/// Files are created with mode `0600` on Unix.
pub struct FileProfileStore {
    codec: ProfileCodec,
    locations: Vec<PathBuf>,
}

impl FileProfileStore {
    /// Create a store with an explicit codec and default search locations.
    pub fn new(codec: ProfileCodec, locations: Vec<PathBuf>) -> Self {
        Self { codec, locations }
    }

    /// Create a store for the invoking user, configured from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = LocalKeyProvider::for_current_user()?;
        let codec = ProfileCodec::with_options(
            Arc::new(provider),
            CodecOptions::from(&config.codec),
        )?;
        Ok(Self::new(codec, config.profile_locations()))
    }

    pub fn codec(&self) -> &ProfileCodec {
        &self.codec
    }

    /// Default search locations, in order.
    pub fn locations(&self) -> &[PathBuf] {
        &self.locations
    }

    /// Check that a profile can be read and decoded.
    ///
    /// Never fails: problems are reported in [`ValidationReport::status`].
    /// With no `path`, the default locations are searched.
    pub async fn validate(&self, path: Option<&Path>) -> ValidationReport {
        let (source, outcome) = match path {
            Some(path) => (
                paths::display_path(path).display().to_string(),
                self.load(path).await,
            ),
            None => match self.find_default().await {
                Ok(found) => (
                    paths::display_path(&found.path).display().to_string(),
                    Ok(found.profile),
                ),
                Err(e) => ("Default locations".to_string(), Err(e)),
            },
        };

        match outcome {
            Ok(profile) => ValidationReport {
                profile: source,
                server: profile.endpoint(),
                status: ValidationReport::STATUS_OK.to_string(),
            },
            Err(e) => ValidationReport {
                profile: source,
                server: ValidationReport::UNREADABLE.to_string(),
                status: e.to_string(),
            },
        }
    }
}

/// Write `data` to `path` with mode 0600 on Unix.
async fn write_profile_file(path: &Path, data: &[u8]) -> Result<()> {
    tokio::fs::write(path, data).await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        tokio::fs::set_permissions(path, perms).await?;
    }

    Ok(())
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn save(&self, path: &Path, profile: &Profile) -> Result<()> {
        let text = self.codec.encode_verified(profile)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        debug!(path = %path.display(), "writing profile");
        write_profile_file(path, text.as_bytes()).await
    }

    async fn load(&self, path: &Path) -> Result<Profile> {
        if !tokio::fs::try_exists(path).await? {
            return Err(ProfileError::NotFound(path.to_path_buf()));
        }

        let text = tokio::fs::read_to_string(path).await?;
        let profile = self.codec.decode(&text)?;
        debug!(path = %path.display(), "loaded profile");
        Ok(profile)
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        Ok(tokio::fs::try_exists(path).await?)
    }

    async fn delete(&self, path: &Path) -> Result<()> {
        if !tokio::fs::try_exists(path).await? {
            return Err(ProfileError::NotFound(path.to_path_buf()));
        }

        debug!(path = %path.display(), "deleting profile");
        tokio::fs::remove_file(path).await?;
        Ok(())
    }

    async fn find_default(&self) -> Result<DefaultProfile> {
        for path in &self.locations {
            match self.load(path).await {
                Ok(profile) => {
                    debug!(path = %path.display(), "using default profile");
                    return Ok(DefaultProfile {
                        path: path.clone(),
                        profile,
                    });
                }
                Err(ProfileError::NotFound(_)) => continue,
                Err(e) => {
                    warn!(path = %path.display(), "skipping unreadable profile: {e}");
                }
            }
        }
        Err(ProfileError::NoDefaultProfile(self.locations.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto;
    use scanprofile_core::UserIdentity;
    use tempfile::TempDir;

    fn codec() -> ProfileCodec {
        let provider = LocalKeyProvider::new(
            crypto::generate_master_key(),
            UserIdentity::new("alice", "scanbox"),
        )
        .unwrap();
        ProfileCodec::new(Arc::new(provider))
    }

    fn test_store(locations: Vec<PathBuf>) -> (FileProfileStore, TempDir) {
        let tmp = TempDir::new().unwrap();
        (FileProfileStore::new(codec(), locations), tmp)
    }

    fn profile() -> Profile {
        Profile::new("scan1", "admin", "s3cr3t")
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (store, tmp) = test_store(Vec::new());
        let path = tmp.path().join("profiles").join("scan.profile.txt");

        store.save(&path, &profile()).await.unwrap();
        assert_eq!(store.load(&path).await.unwrap(), profile());
    }

    #[tokio::test]
    async fn test_file_is_single_base64_line() {
        let (store, tmp) = test_store(Vec::new());
        let path = tmp.path().join("scan.profile.txt");
        store.save(&path, &profile()).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(!content.contains("s3cr3t"));
        assert!(store.codec().decode(&content).is_ok());
    }

    #[tokio::test]
    async fn test_load_tolerates_trailing_newline() {
        let (store, tmp) = test_store(Vec::new());
        let path = tmp.path().join("scan.profile.txt");
        let text = store.codec().encode(&profile()).unwrap();
        tokio::fs::write(&path, format!("{text}\r\n")).await.unwrap();

        assert_eq!(store.load(&path).await.unwrap(), profile());
    }

    #[tokio::test]
    async fn test_load_not_found() {
        let (store, tmp) = test_store(Vec::new());
        let result = store.load(&tmp.path().join("missing.txt")).await;
        assert!(matches!(result, Err(ProfileError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let (store, tmp) = test_store(Vec::new());
        let path = tmp.path().join("scan.profile.txt");
        assert!(!store.exists(&path).await.unwrap());

        store.save(&path, &profile()).await.unwrap();
        assert!(store.exists(&path).await.unwrap());

        store.delete(&path).await.unwrap();
        assert!(!store.exists(&path).await.unwrap());
        assert!(matches!(
            store.delete(&path).await,
            Err(ProfileError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_overwrite_profile() {
        let (store, tmp) = test_store(Vec::new());
        let path = tmp.path().join("scan.profile.txt");

        store.save(&path, &profile()).await.unwrap();
        let updated = Profile::new("scan2", "ops", "n3w").with_port(443);
        store.save(&path, &updated).await.unwrap();

        assert_eq!(store.load(&path).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_profile() {
        let (store, tmp) = test_store(Vec::new());
        let path = tmp.path().join("scan.profile.txt");

        let result = store.save(&path, &Profile::new("", "admin", "pw")).await;
        assert!(matches!(result, Err(ProfileError::Encoding(_))));
        assert!(!path.exists(), "nothing should be written");
    }

    #[tokio::test]
    async fn test_find_default_skips_missing_and_unreadable() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("a").join("scan.profile.txt");
        let garbage = tmp.path().join("b.txt");
        let good = tmp.path().join("c.txt");
        let later = tmp.path().join("d.txt");

        let store = FileProfileStore::new(
            codec(),
            vec![missing, garbage.clone(), good.clone(), later.clone()],
        );
        tokio::fs::write(&garbage, "definitely not a profile").await.unwrap();
        store.save(&good, &profile()).await.unwrap();
        store
            .save(&later, &Profile::new("other", "x", "y"))
            .await
            .unwrap();

        let found = store.find_default().await.unwrap();
        assert_eq!(found.path, good);
        assert_eq!(found.profile, profile());
    }

    #[tokio::test]
    async fn test_find_default_none() {
        let tmp = TempDir::new().unwrap();
        let locations = vec![tmp.path().join("x.txt"), tmp.path().join("y.txt")];
        let store = FileProfileStore::new(codec(), locations);

        match store.find_default().await {
            Err(ProfileError::NoDefaultProfile(searched)) => assert_eq!(searched.len(), 2),
            other => panic!("expected NoDefaultProfile, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_profile_from_other_user_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scan.profile.txt");

        // Written by a different key/identity.
        FileProfileStore::new(codec(), Vec::new())
            .save(&path, &profile())
            .await
            .unwrap();

        let store = FileProfileStore::new(codec(), vec![path]);
        assert!(matches!(
            store.find_default().await,
            Err(ProfileError::NoDefaultProfile(_))
        ));
    }

    #[tokio::test]
    async fn test_validate_ok() {
        let (store, tmp) = test_store(Vec::new());
        let path = tmp.path().join("scan.profile.txt");
        store.save(&path, &profile()).await.unwrap();

        let report = store.validate(Some(&path)).await;
        assert!(report.is_ok());
        assert_eq!(report.server, "scan1:8834");
        assert!(report.profile.ends_with("scan.profile.txt"));
    }

    #[tokio::test]
    async fn test_validate_unreadable() {
        let (store, tmp) = test_store(Vec::new());
        let path = tmp.path().join("scan.profile.txt");
        tokio::fs::write(&path, "AAAA").await.unwrap();

        let report = store.validate(Some(&path)).await;
        assert!(!report.is_ok());
        assert_eq!(report.server, ValidationReport::UNREADABLE);
        assert!(report.status.contains("Protection failure") || report.status.contains("Malformed"));
    }

    #[tokio::test]
    async fn test_validate_default_locations() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scan.profile.txt");
        let store = FileProfileStore::new(codec(), vec![path.clone()]);

        let missing = store.validate(None).await;
        assert_eq!(missing.profile, "Default locations");
        assert!(!missing.is_ok());

        store.save(&path, &profile()).await.unwrap();
        let found = store.validate(None).await;
        assert!(found.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (store, tmp) = test_store(Vec::new());
        let path = tmp.path().join("scan.profile.txt");
        store.save(&path, &profile()).await.unwrap();

        let metadata = tokio::fs::metadata(&path).await.unwrap();
        let mode = metadata.permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "profile file should have 0600 permissions");
    }
}
