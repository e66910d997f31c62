mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{lookup_error, App, Cli};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging on stderr so `--raw` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    info!("Looking up current weather for {}", cli.city);

    // Failures are reported once, by anyhow, when main returns.
    let app = App::new(&cli).context("Failed to initialize OpenWeather client")?;

    app.run(&cli).await.map_err(|e| {
        debug!("Lookup failed: {:?}", e);
        lookup_error(&cli.city, e)
    })?;

    Ok(())
}
