//! Remove a profile file.

use clap::Args;
use scanprofile_core::paths;
use scanprofile_secrets::ProfileStore;

use crate::render;

/// Arguments for `scanprofile delete`.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Profile file to remove
    pub profile_file: String,
}

pub async fn run(args: DeleteArgs, config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let store = super::open_store(config_path)?;
    let path = paths::expand_path(&args.profile_file);

    store.delete(&path).await?;
    render::success(&format!(
        "Deleted {}",
        paths::display_path(&path).display()
    ));
    Ok(())
}
