//! Configuration validation logic
//!
//! Validation methods for the settings sections. Each failure names the dotted
//! field path so that it can be fixed in TOML or through an environment variable.

use crate::config::error::ConfigError;
use crate::config::settings::{ApiConfig, DatabaseConfig, ServerConfig, StorageBackend};
use crate::models::ResourceKind;

/// Upper bound for any configured page size
pub const PAGE_SIZE_CEILING: u32 = 1000;

impl ServerConfig {
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Host must not be empty
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host must not be empty.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// # Validation Rules
    /// - URL is required and must be a PostgreSQL URL for the postgres backend
    /// - Connection counts must be positive with min not exceeding max
    /// - Connection timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == StorageBackend::Postgres {
            if self.url.is_empty() {
                return Err(ConfigError::validation(
                    "database.url",
                    "Database URL is required for the postgres backend. \
                     Set database.url or switch database.backend to \"memory\".",
                ));
            }

            if !self.is_valid_database_url() {
                return Err(ConfigError::validation(
                    "database.url",
                    "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
                ));
            }
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }

    fn is_valid_database_url(&self) -> bool {
        ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

impl ApiConfig {
    /// # Validation Rules
    /// - `base_path` is empty or starts with `/` and has no trailing `/`
    /// - `1 <= default_page_size <= max_page_size <= 1000`
    /// - Resource overrides name a known resource and have a positive cap
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_path.is_empty()
            && (!self.base_path.starts_with('/') || self.base_path.ends_with('/'))
        {
            return Err(ConfigError::validation(
                "api.base_path",
                format!(
                    "Base path '{}' must start with '/' and must not end with '/'.",
                    self.base_path
                ),
            ));
        }

        if self.max_page_size == 0 || self.max_page_size > PAGE_SIZE_CEILING {
            return Err(ConfigError::validation(
                "api.max_page_size",
                format!("Max page size must be between 1 and {PAGE_SIZE_CEILING}."),
            ));
        }

        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::validation(
                "api.default_page_size",
                format!(
                    "Default page size ({}) must be between 1 and max page size ({}).",
                    self.default_page_size, self.max_page_size
                ),
            ));
        }

        for (name, policy) in &self.resources {
            if ResourceKind::from_name(name).is_none() {
                let known: Vec<&str> = ResourceKind::ALL.iter().map(|k| k.name()).collect();
                return Err(ConfigError::validation(
                    format!("api.resources.{name}"),
                    format!("Unknown resource '{name}'. Known resources: {}", known.join(", ")),
                ));
            }
            if policy.max_page_size == Some(0) {
                return Err(ConfigError::validation(
                    format!("api.resources.{name}.max_page_size"),
                    "Max page size must be greater than 0.",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{ResourcePolicy, Settings};

    fn field_of(err: ConfigError) -> String {
        err.field().map(str::to_string).unwrap_or_default()
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "server.port");
    }

    #[test]
    fn test_server_config_invalid_request_timeout() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "server.request_timeout"
        );
    }

    #[test]
    fn test_database_url_required_for_postgres_only() {
        let config = DatabaseConfig::default();
        assert_eq!(field_of(config.validate().unwrap_err()), "database.url");

        let config = DatabaseConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_url_schemes() {
        for url in ["postgres://localhost/db", "postgresql://u:p@localhost:5432/db"] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "URL should be valid: {url}");
        }

        let config = DatabaseConfig {
            url: "mysql://localhost/db".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "database.url");
    }

    #[test]
    fn test_database_min_exceeds_max() {
        let config = DatabaseConfig {
            url: "postgres://localhost/db".to_string(),
            min_connections: 5,
            max_connections: 2,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Min connections (5) cannot exceed max connections (2)"));
    }

    #[test]
    fn test_api_base_path_format() {
        for (path, ok) in [("", true), ("/api", true), ("/api/v1", true), ("api", false), ("/api/", false)] {
            let config = ApiConfig {
                base_path: path.to_string(),
                ..Default::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "base path {path:?}");
        }
    }

    #[test]
    fn test_api_page_sizes() {
        let config = ApiConfig {
            default_page_size: 150,
            max_page_size: 100,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "api.default_page_size");

        let config = ApiConfig {
            max_page_size: PAGE_SIZE_CEILING + 1,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "api.max_page_size");
    }

    #[test]
    fn test_api_unknown_resource_override() {
        let mut config = ApiConfig::default();
        config
            .resources
            .insert("permissions".to_string(), ResourcePolicy::default());

        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("api.resources.permissions"));
        assert!(err.to_string().contains("Known resources: activity_branch"));
    }

    #[test]
    fn test_settings_validate_reports_logger_errors() {
        let mut settings = Settings::default();
        settings.database.backend = StorageBackend::Memory;
        assert!(settings.validate().is_ok());

        settings.logger.console.enabled = false;
        let err = settings.validate().unwrap_err();
        assert_eq!(err.field(), Some("logger"));
    }
}
