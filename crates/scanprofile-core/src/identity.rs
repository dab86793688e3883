//! Local user identity.
//!
//! Protected profiles are bound to the user and machine that created them.
//! The identity is mixed into key derivation, so a blob copied to another
//! account or host will not decode there.

use crate::env;
use crate::error::{Error, Result};
use std::fmt;

/// The `user@host` pair a protected profile is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserIdentity {
    user: String,
    host: String,
}

impl UserIdentity {
    /// Build an identity from explicit parts.
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
        }
    }

    /// Resolve the identity of the invoking user on this machine.
    pub fn current() -> Result<Self> {
        let user = env::get_var("USER")
            .or_else(|| env::get_var("USERNAME"))
            .or_else(|| {
                dirs::home_dir()
                    .and_then(|home| home.file_name().map(|n| n.to_string_lossy().into_owned()))
            })
            .ok_or_else(|| Error::Identity("could not determine current user".to_string()))?;

        let host = hostname::get()?
            .into_string()
            .map_err(|_| Error::Identity("hostname is not valid UTF-8".to_string()))?;

        Ok(Self::new(user, host))
    }

    /// Stable byte form used as key-derivation context.
    ///
    /// Each part is prefixed with its `u32` little-endian length so no two
    /// distinct identities share an encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.user.len() + self.host.len());
        for part in [&self.user, &self.host] {
            bytes.extend_from_slice(&(part.len() as u32).to_le_bytes());
            bytes.extend_from_slice(part.as_bytes());
        }
        bytes
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.host)
    }
}
