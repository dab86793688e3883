//! Print the decoded fields of a profile.

use clap::Args;
use scanprofile_core::paths;
use scanprofile_secrets::{DefaultProfile, ProfileStore};

use crate::render;

/// Arguments for `scanprofile show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Profile file to show (defaults to SCANPROFILE_PROFILE, then the
    /// default locations)
    pub profile_file: Option<String>,
}

pub async fn run(args: ShowArgs, config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let store = super::open_store(config_path)?;

    let found = match super::profile_path(args.profile_file.as_deref()) {
        Some(path) => {
            let profile = store.load(&path).await?;
            DefaultProfile { path, profile }
        }
        None => store.find_default().await?,
    };

    render::field("Profile", paths::display_path(&found.path).display());
    render::field("Server", &found.profile.server);
    render::field("Port", found.profile.port);
    render::field("Username", &found.profile.username);
    // SecretString's Display never prints the value.
    render::field("Password", &found.profile.password);
    Ok(())
}
