//! Configuration schema definitions.

use crate::paths::DEFAULT_PROFILE_FILE_NAME;
use serde::{Deserialize, Serialize};

/// Smallest entropy buffer the codec accepts, in bytes.
///
/// Entropy is the HKDF salt for both the AES key and the GCM nonce, so it
/// must be long enough that two encodes never draw the same value.
pub const MIN_ENTROPY_LEN: usize = 16;

/// Main scanprofile configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Profile codec tuning.
    #[serde(default)]
    pub codec: CodecConfig,

    /// Profile lookup settings.
    #[serde(default)]
    pub profiles: ProfilesConfig,
}

/// Profile codec settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecConfig {
    /// Smallest entropy buffer generated per encode, in bytes.
    #[serde(default = "default_entropy_min")]
    pub entropy_min: usize,

    /// Upper bound (exclusive) of the entropy buffer length, in bytes.
    #[serde(default = "default_entropy_max")]
    pub entropy_max: usize,

    /// Largest plaintext record the encoder accepts, in bytes.
    #[serde(default = "default_max_record_len")]
    pub max_record_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            entropy_min: default_entropy_min(),
            entropy_max: default_entropy_max(),
            max_record_len: default_max_record_len(),
        }
    }
}

fn default_entropy_min() -> usize {
    500
}

fn default_entropy_max() -> usize {
    1000
}

fn default_max_record_len() -> usize {
    64 * 1024
}

/// Profile lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilesConfig {
    /// File name searched for in each default location.
    #[serde(default = "default_file_name")]
    pub default_file_name: String,

    /// Additional locations searched after the built-in ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_paths: Vec<String>,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            default_file_name: default_file_name(),
            search_paths: Vec::new(),
        }
    }
}

fn default_file_name() -> String {
    DEFAULT_PROFILE_FILE_NAME.to_string()
}
