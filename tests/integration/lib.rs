//! Shared fixtures for the integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use scanprofile_core::UserIdentity;
use scanprofile_secrets::{crypto, LocalKeyProvider, ProfileCodec};
use zeroize::Zeroizing;

/// A fixed 32-byte master key.
pub fn fixed_key(byte: u8) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(vec![byte; 32])
}

/// Codec for `user@scanbox` under `key`.
pub fn codec_for(user: &str, key: Zeroizing<Vec<u8>>) -> ProfileCodec {
    let provider = LocalKeyProvider::new(key, UserIdentity::new(user, "scanbox"))
        .expect("valid master key");
    ProfileCodec::new(Arc::new(provider))
}

/// Codec for a fresh random key.
pub fn random_codec(user: &str) -> ProfileCodec {
    codec_for(user, crypto::generate_master_key())
}

/// Candidate profile paths under `root`, in search order.
pub fn locations_under(root: &std::path::Path, names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| root.join(n)).collect()
}
