//! Master key resolution.
//!
//! The master key is resolved in priority order:
//! 1. `SCANPROFILE_MASTER_KEY` environment variable (hex-encoded)
//! 2. `SCANPROFILE_PASSPHRASE` environment variable (stretched with Argon2id,
//!    salted with the user identity)
//! 3. OS keychain (macOS Keychain via Security.framework)
//! 4. Local key file (`~/.scanprofile/master.key`, hex, mode 0600)
//! 5. Generate a new key and persist it (keychain on macOS, key file elsewhere)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use scanprofile_core::env::{self, vars};
use scanprofile_core::{paths, SecretString, UserIdentity};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_SIZE};
use crate::error::{ProfileError, Result};

#[cfg(target_os = "macos")]
const SERVICE_NAME: &str = "scanprofile";
#[cfg(target_os = "macos")]
const ACCOUNT_NAME: &str = "master_key";

/// Where a master key may come from, captured once so resolution is testable
/// without touching the process environment.
#[derive(Debug, Clone)]
pub struct KeySources {
    /// Hex-encoded key supplied directly.
    pub env_key: Option<SecretString>,
    /// Passphrase to derive the key from.
    pub passphrase: Option<SecretString>,
    /// Local key file consulted after the keychain.
    pub key_file: PathBuf,
    /// Whether the OS keychain is consulted at all.
    pub use_keychain: bool,
}

impl KeySources {
    /// Capture key sources from the environment and default paths.
    pub fn from_env() -> Result<Self> {
        let key_file = paths::master_key_file().map_err(|e| ProfileError::Keychain(e.to_string()))?;
        Ok(Self {
            env_key: env::get_var(vars::SCANPROFILE_MASTER_KEY).map(SecretString::new),
            passphrase: env::get_var(vars::SCANPROFILE_PASSPHRASE).map(SecretString::new),
            key_file,
            use_keychain: true,
        })
    }

    /// Sources that only use the given key file.
    pub fn key_file_only(key_file: impl Into<PathBuf>) -> Self {
        Self {
            env_key: None,
            passphrase: None,
            key_file: key_file.into(),
            use_keychain: false,
        }
    }
}

/// Retrieve the master key from the default sources, creating one if none
/// exists yet.
pub fn get_or_create_master_key(identity: &UserIdentity) -> Result<Zeroizing<Vec<u8>>> {
    resolve_master_key(&KeySources::from_env()?, identity)
}

/// Resolve the master key from explicit sources.
pub fn resolve_master_key(
    sources: &KeySources,
    identity: &UserIdentity,
) -> Result<Zeroizing<Vec<u8>>> {
    // 1. Explicit key.
    if let Some(hex_key) = &sources.env_key {
        debug!("using master key from environment variable");
        return decode_hex_key(hex_key.expose_secret(), vars::SCANPROFILE_MASTER_KEY);
    }

    // 2. Passphrase.
    if let Some(passphrase) = &sources.passphrase {
        debug!("deriving master key from passphrase");
        return crypto::derive_master_key_from_passphrase(
            passphrase.expose_secret(),
            &identity.to_bytes(),
        );
    }

    // 3. OS keychain.
    if sources.use_keychain {
        if let Some(key) = get_from_keychain()? {
            debug!("using master key from OS keychain");
            return Ok(key);
        }
    }

    // 4. Key file.
    if let Some(key) = read_key_file(&sources.key_file)? {
        debug!(path = %sources.key_file.display(), "using master key from key file");
        return Ok(key);
    }

    // 5. Generate and persist.
    let key = crypto::generate_master_key();
    if sources.use_keychain && store_in_keychain(&key)? {
        debug!("generated new master key and stored it in the OS keychain");
        return Ok(key);
    }

    if create_key_file(&sources.key_file, &key)? {
        debug!(path = %sources.key_file.display(), "generated new master key file");
        return Ok(key);
    }

    // Another process published a key first; its key wins.
    debug!(path = %sources.key_file.display(), "key file created concurrently, using it");
    read_key_file(&sources.key_file)?.ok_or_else(|| {
        ProfileError::Keychain(format!(
            "key file {} disappeared while being created",
            sources.key_file.display()
        ))
    })
}

/// Decode a hex key and check its length. `origin` names the source in errors.
fn decode_hex_key(hex_key: &str, origin: &str) -> Result<Zeroizing<Vec<u8>>> {
    let key = Zeroizing::new(
        hex::decode(hex_key.trim())
            .map_err(|e| ProfileError::Keychain(format!("invalid hex in {origin}: {e}")))?,
    );
    if key.len() != KEY_SIZE {
        return Err(ProfileError::Keychain(format!(
            "{origin} must decode to exactly {KEY_SIZE} bytes, got {}",
            key.len()
        )));
    }
    Ok(key)
}

fn read_key_file(path: &Path) -> Result<Option<Zeroizing<Vec<u8>>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = Zeroizing::new(fs::read_to_string(path)?);
    decode_hex_key(&content, &path.display().to_string()).map(Some)
}

/// Publish `key` as hex at `path` unless a key file is already there.
///
/// The key is written to a private temporary file and hard-linked into
/// place, so readers never see a partial file and an existing key is never
/// replaced. Returns `false` when another key file was there first.
fn create_key_file(path: &Path, key: &[u8]) -> Result<bool> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    create_private_dir(dir)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "master.key".to_string());
    let tmp = dir.join(format!(".{file_name}.{:016x}.tmp", rand::random::<u64>()));

    let hex_key = Zeroizing::new(hex::encode(key));
    write_private_file(&tmp, hex_key.as_bytes())?;

    let linked = fs::hard_link(&tmp, path);
    if let Err(e) = fs::remove_file(&tmp) {
        warn!(path = %tmp.display(), "failed to remove temporary key file: {e}");
    }

    match linked {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Create a new file readable only by the owner (mode 0600 on Unix).
fn write_private_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

/// Create `dir` and any missing parents with mode 0700 on Unix.
/// Existing directories are left as they are.
fn create_private_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}

// ---------------------------------------------------------------------------
// macOS keychain implementation
// ---------------------------------------------------------------------------

#[cfg(target_os = "macos")]
fn get_from_keychain() -> Result<Option<Zeroizing<Vec<u8>>>> {
    use security_framework::passwords::get_generic_password;

    match get_generic_password(SERVICE_NAME, ACCOUNT_NAME) {
        Ok(data) => {
            // The key is stored as a hex string in the keychain.
            let data = Zeroizing::new(data);
            let hex_str = std::str::from_utf8(&data).map_err(|e| {
                ProfileError::Keychain(format!("keychain data is not valid UTF-8: {e}"))
            })?;
            decode_hex_key(hex_str, "keychain entry").map(Some)
        }
        Err(e) => {
            // errSecItemNotFound is the expected "not stored yet" case.
            let msg = e.to_string();
            if msg.contains("not found") || msg.contains("-25300") {
                Ok(None)
            } else {
                Err(ProfileError::Keychain(format!("keychain read failed: {e}")))
            }
        }
    }
}

#[cfg(target_os = "macos")]
fn store_in_keychain(key: &[u8]) -> Result<bool> {
    use security_framework::passwords::set_generic_password;

    let hex_key = Zeroizing::new(hex::encode(key));
    set_generic_password(SERVICE_NAME, ACCOUNT_NAME, hex_key.as_bytes())
        .map_err(|e| ProfileError::Keychain(format!("keychain write failed: {e}")))?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Other platforms fall back to the key file
// ---------------------------------------------------------------------------

#[cfg(not(target_os = "macos"))]
fn get_from_keychain() -> Result<Option<Zeroizing<Vec<u8>>>> {
    Ok(None)
}

#[cfg(not(target_os = "macos"))]
fn store_in_keychain(_key: &[u8]) -> Result<bool> {
    Ok(false)
}
