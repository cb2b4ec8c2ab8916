//! Dispatches the parsed command

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::AppResult;

/// Runs the selected command. No subcommand means `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use clap::Parser;

    #[tokio::test]
    async fn test_serve_dry_run_does_not_start() {
        let mut settings = Settings::default();
        settings.database.backend = StorageBackend::Memory;
        let cli = Cli::try_parse_from(["donation-rs", "serve", "--dry-run"]).unwrap();

        assert!(execute_command(&cli, settings).await.is_ok());
    }

    #[tokio::test]
    async fn test_migrate_requires_postgres_backend() {
        let mut settings = Settings::default();
        settings.database.backend = StorageBackend::Memory;
        let cli = Cli::try_parse_from(["donation-rs", "migrate"]).unwrap();

        assert!(execute_command(&cli, settings).await.is_err());
    }
}
