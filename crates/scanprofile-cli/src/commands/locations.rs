//! List the default profile search locations.

use scanprofile_core::paths;

use crate::render;

pub async fn run(config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    println!("Default profile locations, in search order:");
    for path in config.profile_locations() {
        let exists = tokio::fs::try_exists(&path).await.unwrap_or(false);
        render::location(&paths::display_path(&path), exists);
    }
    Ok(())
}
