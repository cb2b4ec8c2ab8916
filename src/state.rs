//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::{ConfigReader, Settings, StorageBackend};
use crate::db::{AsyncDbPool, establish_async_connection_pool, run_pending_migrations};
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since Services, AsyncDbPool and the reader all use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool, absent on the memory backend
    pub db_pool: Option<AsyncDbPool>,
    /// Read-only view of the merged configuration handed to every endpoint
    pub config: Arc<dyn ConfigReader>,
}

impl AppState {
    pub fn new(
        services: Services,
        db_pool: Option<AsyncDbPool>,
        config: Arc<dyn ConfigReader>,
    ) -> Self {
        Self {
            services,
            db_pool,
            config,
        }
    }

    /// State backed by empty in-process repositories.
    pub fn in_memory(config: Arc<dyn ConfigReader>) -> Self {
        Self::new(Services::new(Repositories::in_memory()), None, config)
    }

    /// Builds the storage backend selected by `database.backend`.
    ///
    /// On PostgreSQL this opens the pool and, with `database.auto_migrate`,
    /// applies pending migrations first.
    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let config: Arc<dyn ConfigReader> = Arc::new(settings.to_reader()?);

        match settings.database.backend {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage backend");
                Ok(Self::in_memory(config))
            }
            StorageBackend::Postgres => {
                if settings.database.auto_migrate {
                    let applied = run_pending_migrations(&settings.database.url).await?;
                    tracing::info!(count = applied.len(), "Applied pending migrations");
                }

                tracing::info!("Initializing database connection pool...");
                let pool = establish_async_connection_pool(&settings.database).await?;
                tracing::info!("Database connection pool initialized");

                let services = Services::new(Repositories::postgres(pool.clone()));
                Ok(Self::new(services, Some(pool), config))
            }
        }
    }
}
