//! Core types for credential profiles.
//!
//! A [`Profile`] only ever exists transiently in memory; its password is a
//! [`SecretString`] and is wiped when the profile is dropped.

use scanprofile_core::SecretString;
use std::path::PathBuf;

use crate::error::{ProfileError, Result};

/// Default scan server port.
pub const DEFAULT_PORT: u16 = 8834;

/// Connection credentials for a scan server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Host name or IP of the scan server. Must not be empty.
    pub server: String,

    /// Server port. Must not be zero.
    pub port: u16,

    /// Login name. May be empty.
    pub username: String,

    /// Login password. May be empty but is always present.
    pub password: SecretString,
}

impl Profile {
    /// Create a profile on the default port.
    pub fn new(
        server: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Self {
        Self {
            server: server.into(),
            port: DEFAULT_PORT,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `server:port`, as shown in validation reports.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    /// Check the invariants an encodable profile must hold.
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(ProfileError::Encoding(
                "server must not be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(ProfileError::Encoding("port must be positive".to_string()));
        }
        Ok(())
    }
}

/// A profile found by searching the default locations.
#[derive(Debug)]
pub struct DefaultProfile {
    /// File the profile was read from.
    pub path: PathBuf,

    /// Decoded profile.
    pub profile: Profile,
}

/// Outcome of checking that a profile file can be read and decoded.
///
/// Contains no secret material, so it is safe to print or log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Where the profile came from.
    pub profile: String,

    /// `server:port` of the decoded profile, or `Unable to read`.
    pub server: String,

    /// `OK`, or the reason the profile could not be used.
    pub status: String,
}

impl ValidationReport {
    /// Status string for a profile that decoded successfully.
    pub const STATUS_OK: &'static str = "OK";

    /// Server string for a profile that could not be decoded.
    pub const UNREADABLE: &'static str = "Unable to read";

    pub fn is_ok(&self) -> bool {
        self.status == Self::STATUS_OK
    }
}
