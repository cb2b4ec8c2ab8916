//! Configuration management
//!
//! Layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple environments (development, test, staging, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `DONATION_*` environment variables
//! 5. Command-line arguments

pub mod environment;
pub mod error;
pub mod loader;
pub mod reader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use reader::ConfigReader;
pub use settings::{ApiConfig, DatabaseConfig, ResourcePolicy, ServerConfig, Settings, StorageBackend};
