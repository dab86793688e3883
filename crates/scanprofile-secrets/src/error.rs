//! Error types for profile protection.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while encoding, decoding, or storing profiles.
///
/// No variant ever carries password or record bytes; messages describe
/// structure (lengths, field names) only.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Protection failure: {0}")]
    ProtectionFailure(String),

    #[error("Malformed blob: {0}")]
    MalformedBlob(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Profile not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No readable profile found in {} default location(s)", .0.len())]
    NoDefaultProfile(Vec<PathBuf>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
