//! Path resolution utilities.

use crate::env::{self, vars};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// File name looked up in each default profile location.
pub const DEFAULT_PROFILE_FILE_NAME: &str = "scan.profile.txt";

/// Application folder name used under the config and documents directories.
const APP_DIR_NAME: &str = "scanprofile";

/// Get the scanprofile base directory (~/.scanprofile, or `SCANPROFILE_HOME`).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    if let Some(home) = env::get_var(vars::SCANPROFILE_HOME) {
        return Ok(expand_path(&home));
    }
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".scanprofile"))
}

/// Get the main config file path (~/.scanprofile/scanprofile.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    if let Some(path) = env::get_var(vars::SCANPROFILE_CONFIG) {
        return Ok(expand_path(&path));
    }
    Ok(base_dir()?.join("scanprofile.json5"))
}

/// Get the local master key file path (~/.scanprofile/master.key).
pub fn master_key_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("master.key"))
}

/// Ordered list of places a profile is looked for when none is named.
///
/// The working directory comes first, then the per-user config directory,
/// then the documents directory, then any `extra` paths from configuration.
/// Directories that cannot be resolved on this platform are skipped.
pub fn default_profile_locations(file_name: &str, extra: &[String]) -> Vec<PathBuf> {
    let mut locations = Vec::new();

    match std::env::current_dir() {
        Ok(cwd) => locations.push(cwd.join(file_name)),
        Err(_) => locations.push(PathBuf::from(file_name)),
    }

    for root in [dirs::config_dir(), dirs::document_dir()].into_iter().flatten() {
        locations.push(root.join(APP_DIR_NAME).join("profiles").join(file_name));
        locations.push(root.join(file_name));
    }

    locations.extend(extra.iter().map(|p| expand_path(p)));
    locations
}

/// Expand `~` and environment variable references in a path.
pub fn expand_path(path: &str) -> PathBuf {
    expand_tilde(&env::expand_vars(path))
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Make a path absolute for display, without requiring it to exist.
pub fn display_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
