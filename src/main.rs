use clap::Parser;

use donation_rs::cli::{Cli, execute_command, load_and_merge_config};
use donation_rs::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli).map_err(|e| {
        eprintln!("Configuration error: {e}");
        e
    })?;
    init_logger(&settings.logger)?;

    if let Err(e) = execute_command(&cli, settings).await {
        tracing::error!(error = %e, "Command failed");
        return Err(e.into());
    }
    Ok(())
}
