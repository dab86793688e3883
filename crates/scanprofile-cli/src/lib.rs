//! scanprofile command-line interface.

pub mod commands;
pub mod render;

use clap::{Parser, Subcommand};

/// scanprofile - protected scan server credential profiles
#[derive(Parser, Debug)]
#[command(name = "scanprofile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "SCANPROFILE_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a protected profile
    New(commands::new::NewArgs),

    /// Check that a profile can be decoded by the current user
    Test(commands::test::TestArgs),

    /// Show a decoded profile with the password redacted
    Show(commands::show::ShowArgs),

    /// Delete a profile file
    Delete(commands::delete::DeleteArgs),

    /// List default profile locations
    Locations,

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::New(args) => commands::new::run(args, config).await,
        Commands::Test(args) => commands::test::run(args, config).await,
        Commands::Show(args) => commands::show::run(args, config).await,
        Commands::Delete(args) => commands::delete::run(args, config).await,
        Commands::Locations => commands::locations::run(config).await,
        Commands::Config(args) => commands::config::run(args, config).await,
        Commands::Version => {
            println!("scanprofile {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
