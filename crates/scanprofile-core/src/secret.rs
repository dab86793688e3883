//! Secure string handling with memory protection.

use std::fmt;
use std::str::Utf8Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string that is zeroed on drop for secure credential handling.
///
/// Holds profile passwords. Not serializable; the profile record encoder is
/// the only place the raw bytes are read.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Take ownership of UTF-8 bytes.
    ///
    /// On failure the rejected bytes are wiped before the error is returned.
    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self, Utf8Error> {
        match String::from_utf8(bytes) {
            Ok(inner) => Ok(Self { inner }),
            Err(e) => {
                let reason = e.utf8_error();
                let mut rejected = e.into_bytes();
                rejected.zeroize();
                Err(reason)
            }
        }
    }

    /// Expose the secret value.
    ///
    /// Use sparingly - only when the actual value is needed.
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// Expose the secret as raw UTF-8 bytes.
    pub fn expose_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Check if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get the length of the secret in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

// Never print secrets
impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(self.inner.as_bytes(), other.inner.as_bytes())
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_redacted() {
        let secret = SecretString::new("s3cr3t");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_secret_string_expose() {
        let secret = SecretString::new("s3cr3t");
        assert_eq!(secret.expose_secret(), "s3cr3t");
        assert_eq!(secret.expose_bytes(), b"s3cr3t");
        assert_eq!(secret.len(), 6);
    }

    #[test]
    fn test_secret_string_equality() {
        let a = SecretString::new("secret");
        let b = SecretString::new("secret");
        let c = SecretString::new("different");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_secret_is_present() {
        let secret = SecretString::default();
        assert!(secret.is_empty());
        assert_eq!(secret, SecretString::new(""));
    }

    #[test]
    fn test_from_utf8() {
        let secret = SecretString::from_utf8(b"p\xc3\xa4ss".to_vec()).unwrap();
        assert_eq!(secret.expose_secret(), "päss");

        assert!(SecretString::from_utf8(vec![0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_zeroize_clears_value() {
        let mut secret = SecretString::new("wipe-me");
        secret.zeroize();
        assert!(secret.is_empty());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
    }
}
