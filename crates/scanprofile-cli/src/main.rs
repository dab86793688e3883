//! scanprofile CLI entry point.

use clap::Parser;
use scanprofile_cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries command output (e.g. a blob).
    let default_filter = match cli.verbose {
        0 => "scanprofile=info",
        1 => "scanprofile=debug",
        _ => "scanprofile=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(cli).await
}
