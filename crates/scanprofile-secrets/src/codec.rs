//! Profile codec.
//!
//! `encode` turns a [`Profile`] into a single line of base64 text;
//! `decode` reverses it. Every encode draws fresh entropy of random length,
//! so the same profile never produces the same blob twice.

use std::sync::Arc;

use scanprofile_core::config::{CodecConfig, MIN_ENTROPY_LEN};
use tracing::debug;

use crate::blob;
use crate::crypto;
use crate::error::{ProfileError, Result};
use crate::provider::ProtectionProvider;
use crate::record;
use crate::types::Profile;

/// Range of entropy lengths, `min..max` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for EntropyBounds {
    fn default() -> Self {
        Self { min: 500, max: 1000 }
    }
}

impl EntropyBounds {
    fn validate(&self) -> Result<()> {
        if self.min < MIN_ENTROPY_LEN {
            return Err(ProfileError::Encoding(format!(
                "entropy length {} is below the minimum of {MIN_ENTROPY_LEN} bytes",
                self.min
            )));
        }
        if self.max < self.min {
            return Err(ProfileError::Encoding(format!(
                "entropy bounds {}..{} are inverted",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Codec tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    pub entropy: EntropyBounds,
    pub max_record_len: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            entropy: EntropyBounds::default(),
            max_record_len: 64 * 1024,
        }
    }
}

impl From<&CodecConfig> for CodecOptions {
    fn from(config: &CodecConfig) -> Self {
        Self {
            entropy: EntropyBounds {
                min: config.entropy_min,
                max: config.entropy_max,
            },
            max_record_len: config.max_record_len,
        }
    }
}

/// Encodes profiles to protected text and back.
///
/// Stateless between calls; one codec can be shared across threads.
#[derive(Clone)]
pub struct ProfileCodec {
    provider: Arc<dyn ProtectionProvider>,
    options: CodecOptions,
}

impl ProfileCodec {
    pub fn new(provider: Arc<dyn ProtectionProvider>) -> Self {
        Self {
            provider,
            options: CodecOptions::default(),
        }
    }

    /// Build a codec with custom options.
    ///
    /// Fails with [`ProfileError::Encoding`] when the entropy bounds allow
    /// fewer than [`MIN_ENTROPY_LEN`] bytes or are inverted.
    pub fn with_options(
        provider: Arc<dyn ProtectionProvider>,
        options: CodecOptions,
    ) -> Result<Self> {
        options.entropy.validate()?;
        Ok(Self { provider, options })
    }

    /// Encode a profile into protected base64 text.
    pub fn encode(&self, profile: &Profile) -> Result<String> {
        profile.validate()?;

        let entropy = crypto::generate_entropy(self.options.entropy.min, self.options.entropy.max);
        let ciphertext = {
            let plaintext = record::encode_record(profile, self.options.max_record_len)?;
            self.provider.protect(&plaintext, &entropy)?
        };

        let framed = blob::frame(&entropy, &ciphertext)?;
        debug!(
            entropy_len = entropy.len(),
            ciphertext_len = ciphertext.len(),
            "encoded profile"
        );
        Ok(blob::to_text(&framed))
    }

    /// Decode protected text back into a profile.
    pub fn decode(&self, text: &str) -> Result<Profile> {
        let framed = blob::from_text(text)?;
        let (entropy, ciphertext) = blob::split(&framed)?;

        let plaintext = self.provider.unprotect(ciphertext, entropy)?;
        let profile = record::decode_record(&plaintext)?;

        debug!(
            entropy_len = entropy.len(),
            ciphertext_len = ciphertext.len(),
            "decoded profile"
        );
        Ok(profile)
    }

    /// Encode, then check the result decodes back to the same profile.
    pub fn encode_verified(&self, profile: &Profile) -> Result<String> {
        let text = self.encode(profile)?;
        if self.decode(&text)? != *profile {
            return Err(ProfileError::Encoding(
                "encoded profile did not round-trip".to_string(),
            ));
        }
        Ok(text)
    }
}
