//! Migrate command handler

use crate::config::{Settings, StorageBackend};
use crate::db::{pending_migrations, rollback_migrations, run_pending_migrations};
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Lists pending migrations with `dry_run`, reverts `rollback` steps, or
    /// applies everything pending.
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if self.config.database.backend != StorageBackend::Postgres {
            return Err(AppError::Validation {
                field: "database.backend".to_string(),
                reason: "migrations require the postgres backend".to_string(),
            });
        }
        if rollback == Some(0) {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        self.config.database.validate()?;

        let url = &self.config.database.url;
        if dry_run {
            let pending = pending_migrations(url)
                .await
                .map_err(|e| migration_error("list pending migrations", e))?;
            if pending.is_empty() {
                println!("✓ No pending migrations - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {name}");
                }
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            let reverted = rollback_migrations(url, steps)
                .await
                .map_err(|e| migration_error("revert migrations", e))?;
            println!("✓ Rolled back {} migration(s):", reverted.len());
            for version in &reverted {
                println!("  - {version}");
            }
            return Ok(());
        }

        let applied = run_pending_migrations(url)
            .await
            .map_err(|e| migration_error("run pending migrations", e))?;
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {version}");
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

fn migration_error(operation: &str, source: anyhow::Error) -> AppError {
    tracing::error!(operation, error = %source, "Migration command failed");
    AppError::Database {
        operation: operation.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/donations_test".to_string();
        config
    }

    #[tokio::test]
    async fn test_zero_rollback_steps_rejected() {
        let handler = MigrateCommandHandler::new(postgres_config());

        match handler.execute(false, Some(0)).await {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("greater than 0"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_memory_backend_rejected() {
        let mut config = postgres_config();
        config.database.backend = StorageBackend::Memory;

        match MigrateCommandHandler::new(config).execute(true, None).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "database.backend"),
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_connecting() {
        let mut config = postgres_config();
        config.database.url = "mysql://localhost/donations".to_string();

        let result = MigrateCommandHandler::new(config).execute(false, None).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
