//! Protected blob framing.
//!
//! `[u32 LE entropy length][entropy][ciphertext]`, carried as standard
//! padded base64 so a profile fits on a single line of text.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{ProfileError, Result};

/// Size of the entropy length prefix.
pub const LENGTH_PREFIX: usize = 4;

/// Assemble the binary frame.
pub fn frame(entropy: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(entropy.len())
        .map_err(|_| ProfileError::Encoding("entropy buffer too large".to_string()))?;

    let mut buf = Vec::with_capacity(LENGTH_PREFIX + entropy.len() + ciphertext.len());
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(entropy);
    buf.extend_from_slice(ciphertext);
    Ok(buf)
}

/// Split a binary frame into `(entropy, ciphertext)`.
pub fn split(bytes: &[u8]) -> Result<(&[u8], &[u8])> {
    if bytes.len() < LENGTH_PREFIX {
        return Err(ProfileError::MalformedBlob(format!(
            "blob is {} bytes, shorter than the {LENGTH_PREFIX}-byte length prefix",
            bytes.len()
        )));
    }

    let (prefix, rest) = bytes.split_at(LENGTH_PREFIX);
    let entropy_len = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
    if entropy_len > rest.len() {
        return Err(ProfileError::MalformedBlob(format!(
            "entropy length {entropy_len} exceeds remaining {} bytes",
            rest.len()
        )));
    }

    Ok(rest.split_at(entropy_len))
}

/// Text-encode a frame.
pub fn to_text(frame: &[u8]) -> String {
    STANDARD.encode(frame)
}

/// Decode text back into a frame. Surrounding whitespace is ignored.
pub fn from_text(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| ProfileError::MalformedBlob(format!("base64 decoding failed: {e}")))
}
