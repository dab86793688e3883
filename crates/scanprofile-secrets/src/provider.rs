//! Protection providers.
//!
//! A [`ProtectionProvider`] turns plaintext into ciphertext and back, scoped
//! to one local user identity. Key material never appears in its output.
//! [`LocalKeyProvider`] is the portable implementation: a locally held master
//! key plus the user identity feed HKDF-SHA256, and AES-256-GCM provides the
//! integrity check.

use std::fmt;

use scanprofile_core::UserIdentity;
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_SIZE};
use crate::error::{ProfileError, Result};
use crate::keychain;

/// Identity-scoped encrypt/decrypt capability.
pub trait ProtectionProvider: Send + Sync {
    /// Encrypt `plaintext`. `aux` shifts the effective key; the same
    /// `(plaintext, aux)` under the same identity gives the same output.
    fn protect(&self, plaintext: &[u8], aux: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt `ciphertext` produced by [`protect`](Self::protect) with the
    /// same `aux` and identity.
    ///
    /// Fails with [`ProfileError::ProtectionFailure`] on any mismatch.
    fn unprotect(&self, ciphertext: &[u8], aux: &[u8]) -> Result<Zeroizing<Vec<u8>>>;
}

/// Provider backed by a local master key and the user identity.
pub struct LocalKeyProvider {
    master_key: Zeroizing<Vec<u8>>,
    identity: UserIdentity,
    context: Vec<u8>,
}

impl LocalKeyProvider {
    /// Build a provider from a 32-byte master key.
    pub fn new(master_key: Zeroizing<Vec<u8>>, identity: UserIdentity) -> Result<Self> {
        if master_key.len() != KEY_SIZE {
            return Err(ProfileError::Keychain(format!(
                "master key must be {KEY_SIZE} bytes, got {}",
                master_key.len()
            )));
        }
        let context = identity.to_bytes();
        Ok(Self {
            master_key,
            identity,
            context,
        })
    }

    /// Build a provider for the invoking user, resolving the master key from
    /// the environment, keychain, or key file.
    pub fn for_current_user() -> Result<Self> {
        let identity = UserIdentity::current()
            .map_err(|e| ProfileError::ProtectionFailure(format!("no user identity: {e}")))?;
        let master_key = keychain::get_or_create_master_key(&identity)?;
        Self::new(master_key, identity)
    }
}

impl ProtectionProvider for LocalKeyProvider {
    fn protect(&self, plaintext: &[u8], aux: &[u8]) -> Result<Vec<u8>> {
        crypto::seal(&self.master_key, aux, &self.context, plaintext)
    }

    fn unprotect(&self, ciphertext: &[u8], aux: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        crypto::open(&self.master_key, aux, &self.context, ciphertext)
    }
}

impl fmt::Debug for LocalKeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKeyProvider")
            .field("identity", &self.identity)
            .field("master_key", &"[REDACTED]")
            .finish()
    }
}
