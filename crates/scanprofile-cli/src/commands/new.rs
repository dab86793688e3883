//! Create a protected profile.

use clap::Args;
use scanprofile_core::{paths, SecretString};
use scanprofile_secrets::{Profile, ProfileStore, DEFAULT_PORT};
use tracing::info;

use crate::render;

/// Arguments for `scanprofile new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Scan server host name or address
    #[arg(long)]
    pub server: String,

    /// Scan server port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Account name on the scan server
    #[arg(long)]
    pub username: String,

    /// Read the password from this environment variable instead of prompting
    #[arg(long, value_name = "VAR")]
    pub password_env: Option<String>,

    /// Write the profile to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out_file: Option<String>,
}

pub async fn run(args: NewArgs, config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let password = read_password(&args)?;
    let profile = Profile::new(args.server, args.username, password).with_port(args.port);
    profile.validate()?;

    let store = super::open_store(config_path)?;

    match args.out_file {
        Some(out) => {
            let path = paths::expand_path(&out);
            store.save(&path, &profile).await?;
            info!(path = %path.display(), server = %profile.endpoint(), "profile saved");
            render::success(&format!(
                "Profile for {} saved to {}",
                profile.endpoint(),
                paths::display_path(&path).display()
            ));
        }
        None => {
            let text = store.codec().encode_verified(&profile)?;
            println!("{text}");
        }
    }

    Ok(())
}

fn read_password(args: &NewArgs) -> anyhow::Result<SecretString> {
    if let Some(var) = &args.password_env {
        let value = std::env::var(var)
            .map_err(|_| anyhow::anyhow!("Environment variable {var} is not set"))?;
        return Ok(SecretString::new(value));
    }

    let prompt = format!("Password for {}@{}: ", args.username, args.server);
    Ok(SecretString::new(rpassword::prompt_password(prompt)?))
}
