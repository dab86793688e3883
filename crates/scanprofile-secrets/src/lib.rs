//! Protected credential profiles for scanprofile.
//!
//! A [`Profile`] (server, port, username, password) is serialized to an
//! explicit binary record, encrypted by a [`ProtectionProvider`] bound to the
//! local user identity, framed together with per-encode random entropy, and
//! presented as a single base64 line that is safe to write to disk.

pub mod blob;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod keychain;
pub mod provider;
pub mod record;
pub mod store;
pub mod types;

pub use codec::{CodecOptions, EntropyBounds, ProfileCodec};
pub use error::{ProfileError, Result};
pub use provider::{LocalKeyProvider, ProtectionProvider};
pub use store::{FileProfileStore, ProfileStore};
pub use types::{DefaultProfile, Profile, ValidationReport, DEFAULT_PORT};
