//! Configuration loading and persistence.

use super::{Config, MIN_ENTROPY_LEN};
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Hard ceiling on the configurable entropy length.
const MAX_ENTROPY_LEN: usize = 64 * 1024;

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load the default configuration file, falling back to built-in defaults
    /// when it does not exist.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::load_default() {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(path)) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        // 1. Entropy bounds
        if self.codec.entropy_min < MIN_ENTROPY_LEN {
            errors.push(format!(
                "Codec entropyMin ({}) must be at least {}",
                self.codec.entropy_min, MIN_ENTROPY_LEN
            ));
        }
        if self.codec.entropy_max <= self.codec.entropy_min {
            errors.push(format!(
                "Codec entropyMax ({}) must be greater than entropyMin ({})",
                self.codec.entropy_max, self.codec.entropy_min
            ));
        }
        if self.codec.entropy_max > MAX_ENTROPY_LEN {
            errors.push(format!(
                "Codec entropyMax {} exceeds maximum of {}",
                self.codec.entropy_max, MAX_ENTROPY_LEN
            ));
        }

        // 2. Record size limit
        if self.codec.max_record_len == 0 {
            errors.push("Codec maxRecordLen must be greater than 0".to_string());
        }

        // 3. Profile file name must be a bare file name
        let name = &self.profiles.default_file_name;
        if name.trim().is_empty() {
            errors.push("Profiles defaultFileName must not be empty".to_string());
        } else if name.contains(['/', '\\']) {
            errors.push(format!(
                "Profiles defaultFileName '{}' must not contain path separators",
                name
            ));
        }

        // 4. Search paths must not be blank
        for (i, path) in self.profiles.search_paths.iter().enumerate() {
            if path.trim().is_empty() {
                errors.push(format!("Profiles searchPaths[{}] must not be empty", i));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Default profile locations for this configuration, in search order.
    pub fn profile_locations(&self) -> Vec<PathBuf> {
        paths::default_profile_locations(
            &self.profiles.default_file_name,
            &self.profiles.search_paths,
        )
    }
}
