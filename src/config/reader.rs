//! Read-only key-value access to configuration
//!
//! Resource endpoints receive an `Arc<dyn ConfigReader>` instead of the typed
//! [`Settings`](crate::config::settings::Settings), so that any key can be
//! looked up without the endpoint knowing the whole settings tree.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Key-value lookup over dotted keys such as `api.max_page_size`.
pub trait ConfigReader: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl dyn ConfigReader {
    /// Parses a value, treating a missing key as `None` and a malformed one as an error.
    pub fn parse<T>(&self, key: &str) -> AppResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(raw) = self.lookup(key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Configuration {
                key: key.to_string(),
                source: anyhow::anyhow!("invalid value '{raw}': {e}"),
            })
    }

    pub fn parse_or<T>(&self, key: &str, default: T) -> AppResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        Ok(self.parse(key)?.unwrap_or(default))
    }
}

impl ConfigReader for config::Config {
    fn lookup(&self, key: &str) -> Option<String> {
        config::Config::get_string(self, key).ok()
    }
}

impl ConfigReader for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
