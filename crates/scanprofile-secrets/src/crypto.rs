//! AES-256-GCM encryption with HKDF-SHA256 key derivation.
//!
//! The master key is never used directly as a cipher key. Each call derives
//! both the AES key and the GCM nonce from `(master key, salt, context)`, so
//! sealing is deterministic for a given salt. Callers must therefore never
//! reuse a salt; the profile codec draws a fresh random one per encode.

use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use hkdf::Hkdf;
use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::{ProfileError, Result};

const NONCE_SIZE: usize = 12;
pub(crate) const KEY_SIZE: usize = 32;

/// HKDF info prefix used to domain-separate derived keys.
const HKDF_INFO: &[u8] = b"scanprofile-protect-v1";

/// Argon2id cost parameters for passphrase-derived master keys.
const ARGON2_MEMORY_KIB: u32 = 19 * 1024;
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_LANES: u32 = 1;

/// Derive the AES key and nonce for one seal/open call.
fn derive_key_and_nonce(
    master_key: &[u8],
    salt: &[u8],
    context: &[u8],
) -> Result<Zeroizing<[u8; KEY_SIZE + NONCE_SIZE]>> {
    let hk = Hkdf::<Sha256>::new(Some(salt), master_key);

    let mut info = Vec::with_capacity(HKDF_INFO.len() + 1 + context.len());
    info.extend_from_slice(HKDF_INFO);
    info.push(0);
    info.extend_from_slice(context);

    let mut okm = Zeroizing::new([0u8; KEY_SIZE + NONCE_SIZE]);
    hk.expand(&info, &mut okm[..])
        .map_err(|e| ProfileError::ProtectionFailure(format!("key derivation failed: {e}")))?;
    Ok(okm)
}

/// Encrypt `plaintext` under a key derived from `master_key`, `salt` and
/// `context`. The context is also bound as associated data.
///
/// Returns the ciphertext with the 16-byte authentication tag appended.
pub fn seal(master_key: &[u8], salt: &[u8], context: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let okm = derive_key_and_nonce(master_key, salt, context)?;
    let (key, nonce) = okm.split_at(KEY_SIZE);

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| ProfileError::ProtectionFailure(e.to_string()))?;

    cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad: context,
            },
        )
        .map_err(|e| ProfileError::ProtectionFailure(format!("encryption failed: {e}")))
}

/// Decrypt data previously produced by [`seal`] with the same
/// `master_key`, `salt` and `context`.
pub fn open(
    master_key: &[u8],
    salt: &[u8],
    context: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let okm = derive_key_and_nonce(master_key, salt, context)?;
    let (key, nonce) = okm.split_at(KEY_SIZE);

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| ProfileError::ProtectionFailure(e.to_string()))?;

    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: context,
            },
        )
        .map(Zeroizing::new)
        .map_err(|_| {
            ProfileError::ProtectionFailure(
                "authentication failed (wrong identity, wrong key, or tampered data)".to_string(),
            )
        })
}

/// Generate a new random 256-bit master key.
pub fn generate_master_key() -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; KEY_SIZE]);
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// Stretch a passphrase into a 256-bit master key with Argon2id.
///
/// `salt_context` is hashed to a fixed-size salt, so any stable value (for
/// example the user identity) can be passed.
pub fn derive_master_key_from_passphrase(
    passphrase: &str,
    salt_context: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_LANES,
        Some(KEY_SIZE),
    )
    .map_err(|e| ProfileError::Keychain(format!("argon2 parameters rejected: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let salt = Sha256::digest(salt_context);
    let mut output = Zeroizing::new(vec![0u8; KEY_SIZE]);
    argon2
        .hash_password_into(passphrase.as_bytes(), &salt, &mut output)
        .map_err(|e| ProfileError::Keychain(format!("argon2 derivation failed: {e}")))?;
    Ok(output)
}

/// Fill a buffer of random length in `min..max` with random bytes.
pub fn generate_entropy(min: usize, max: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let len = if max > min { rng.gen_range(min..max) } else { min };
    let mut entropy = vec![0u8; len];
    rng.fill_bytes(&mut entropy);
    entropy
}
