//! Request/response shapes tied to each resource entity.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Entity;

/// Dotted lowercase identifiers such as `donations.approve`.
pub static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$").expect("code pattern is valid")
});

/// Binds an entity to the JSON bodies its endpoint accepts and returns.
pub trait ResourceDto: Entity {
    /// POST body
    type Create: DeserializeOwned + Validate + Into<Self::New> + ToSchema + Send + 'static;
    /// PUT body, every field optional
    type Update: DeserializeOwned + Validate + Into<Self::Changes> + ToSchema + Send + 'static;
    type Response: Serialize + From<Self> + ToSchema + Send + 'static;
}

/// Tells an absent field (`None`) apart from an explicit `null` (`Some(None)`).
///
/// Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        description: Option<Option<String>>,
    }

    #[test]
    fn test_code_pattern() {
        for valid in ["donations", "donations.approve", "cold_chain.pickup_2"] {
            assert!(CODE_PATTERN.is_match(valid), "{valid}");
        }
        for invalid in ["", "Donations", "2fa", "a..b", "a.", ".a", "a-b"] {
            assert!(!CODE_PATTERN.is_match(invalid), "{invalid}");
        }
    }

    #[test]
    fn test_double_option_distinguishes_null_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        let set: Patch = serde_json::from_str(r#"{"description": "x"}"#).unwrap();

        assert_eq!(missing.description, None);
        assert_eq!(null.description, Some(None));
        assert_eq!(set.description, Some(Some("x".to_string())));
    }
}
