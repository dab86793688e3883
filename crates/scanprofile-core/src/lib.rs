//! # scanprofile-core
//!
//! Core types, configuration, and utilities for scanprofile.
//!
//! This crate provides shared functionality used by the codec and the CLI:
//!
//! - **Configuration**: Loading, validation, and persistence of the config file
//! - **Secrets**: Zeroize-on-drop password handling
//! - **Identity**: The local user identity that protected profiles are bound to
//! - **Utilities**: Path resolution, default profile locations, and environment handling

pub mod config;
pub mod env;
pub mod error;
pub mod identity;
pub mod paths;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use identity::UserIdentity;
pub use secret::SecretString;
