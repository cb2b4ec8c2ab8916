//! Serve command handler

use crate::api::routes::create_router;
use crate::config::Settings;
use crate::error::AppResult;
use crate::server::Server;
use crate::state::AppState;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Starts the server, or with `dry_run` only checks the configuration.
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }
        Server::new(self.config.clone()).run().await?;
        Ok(())
    }

    /// Validates the settings and builds the full router on an empty
    /// in-memory state, so per-resource policies are checked too.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        let reader = self.config.to_reader()?;
        let state = AppState::in_memory(std::sync::Arc::new(reader));
        let _router = create_router(state, &self.config)?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Storage backend: {:?}", self.config.database.backend);
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ResourcePolicy, StorageBackend};

    fn memory_config() -> Settings {
        let mut config = Settings::default();
        config.database.backend = StorageBackend::Memory;
        config
    }

    #[tokio::test]
    async fn test_dry_run_accepts_valid_config() {
        let handler = ServeCommandHandler::new(memory_config());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_rejects_invalid_port() {
        let mut config = memory_config();
        config.server.port = 0;
        assert!(ServeCommandHandler::new(config).execute(true).await.is_err());
    }

    #[test]
    fn test_dry_run_rejects_unknown_resource_policy() {
        let mut config = memory_config();
        config
            .api
            .resources
            .insert("donor".to_string(), ResourcePolicy::default());
        assert!(ServeCommandHandler::new(config).validate_only().is_err());
    }
}
