//! CLI command implementations.

pub mod config;
pub mod delete;
pub mod locations;
pub mod new;
pub mod show;

use std::path::{Path, PathBuf};

use scanprofile_core::{env, paths, Config};
use scanprofile_secrets::FileProfileStore;
use tracing::debug;

/// Load the configuration from `path`, or the default location.
///
/// A missing file means built-in defaults.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) if path.exists() => Config::load(path)?,
        Some(path) => {
            debug!(path = %path.display(), "config file not found, using defaults");
            Config::default()
        }
        None => Config::load_or_default()?,
    };
    Ok(config)
}

/// Open the profile store for the invoking user.
pub(crate) fn open_store(config_path: Option<&Path>) -> anyhow::Result<FileProfileStore> {
    let config = load_config(config_path)?;
    Ok(FileProfileStore::from_config(&config)?)
}

/// Profile path from the command line, falling back to `SCANPROFILE_PROFILE`.
/// `None` means search the default locations.
pub(crate) fn profile_path(arg: Option<&str>) -> Option<PathBuf> {
    arg.map(str::to_string)
        .or_else(|| env::get_var(env::vars::SCANPROFILE_PROFILE))
        .filter(|p| !p.trim().is_empty())
        .map(|p| paths::expand_path(&p))
}
