//! Environment variable handling.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::env;

/// Matches `${VAR}`, `$VAR` and `%VAR%` references.
static VAR_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)|%([A-Za-z_][A-Za-z0-9_()]*)%")
        .expect("invalid regex")
});

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Expand environment variable references in `input`.
///
/// Unix (`$VAR`, `${VAR}`) and Windows (`%VAR%`) forms are both accepted so
/// profile paths written on either platform resolve the same way. Unset
/// variables are left untouched.
pub fn expand_vars(input: &str) -> String {
    VAR_REF
        .replace_all(input, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            get_var(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Common environment variable names.
pub mod vars {
    /// scanprofile home directory override.
    pub const SCANPROFILE_HOME: &str = "SCANPROFILE_HOME";

    /// scanprofile config file override.
    pub const SCANPROFILE_CONFIG: &str = "SCANPROFILE_CONFIG";

    /// Hex-encoded 32-byte master key.
    pub const SCANPROFILE_MASTER_KEY: &str = "SCANPROFILE_MASTER_KEY";

    /// Passphrase to derive the master key from.
    pub const SCANPROFILE_PASSPHRASE: &str = "SCANPROFILE_PASSPHRASE";

    /// Default profile file used when none is given on the command line.
    pub const SCANPROFILE_PROFILE: &str = "SCANPROFILE_PROFILE";
}
