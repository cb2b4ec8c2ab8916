//! Embedded diesel migrations.
//!
//! `MigrationHarness` is synchronous, so migrations run on a blocking
//! `PgConnection` inside `spawn_blocking`.

use anyhow::{Context, anyhow};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies every pending migration and returns the applied versions.
pub async fn run_pending_migrations(database_url: &str) -> anyhow::Result<Vec<String>> {
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url).context("failed to connect for migrations")?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!("failed to run migrations: {e}"))?;
        Ok(applied.into_iter().map(|v| v.to_string()).collect())
    })
    .await
    .context("migration task panicked")?
}

/// Reverts the last `steps` applied migrations and returns the reverted versions.
pub async fn rollback_migrations(database_url: &str, steps: u32) -> anyhow::Result<Vec<String>> {
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url).context("failed to connect for migrations")?;
        let mut reverted = Vec::new();
        for _ in 0..steps {
            let version = conn
                .revert_last_migration(MIGRATIONS)
                .map_err(|e| anyhow!("failed to revert migration: {e}"))?;
            reverted.push(version.to_string());
        }
        Ok(reverted)
    })
    .await
    .context("migration task panicked")?
}

/// Lists migrations that have not been applied yet.
pub async fn pending_migrations(database_url: &str) -> anyhow::Result<Vec<String>> {
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url).context("failed to connect for migrations")?;
        let pending = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!("failed to list migrations: {e}"))?;
        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
    .context("migration task panicked")?
}
