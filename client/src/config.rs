//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::Deserialize;
use service::infra::rest;
use smart_default::SmartDefault;

/// Client configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration of the proxy API the client talks to.
    pub api: Api,

    /// Search input configuration.
    pub search: Search,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("CLIENT").separator("."),
            )
            .build()?
            .try_deserialize()
    }
}

/// Configuration of the proxy API.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL of the proxy API.
    #[default("http://localhost:3000/api".to_owned())]
    pub base_url: String,

    /// Key to authorize requests to the proxy API with.
    #[default(SecretString::from("api-key"))]
    pub auth_key: SecretString,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Api> for rest::Config {
    fn from(value: Api) -> Self {
        let Api {
            base_url,
            auth_key,
            timeout,
        } = value;
        Self {
            base_url,
            auth_key,
            timeout,
        }
    }
}

/// Search input configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Search {
    /// Quiet period after the last keystroke before the search text is
    /// applied.
    #[default(time::Duration::from_millis(500))]
    #[serde(with = "humantime_serde")]
    pub debounce: time::Duration,
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::Config;

    #[test]
    fn defaults_without_sources() {
        let conf = Config::new("definitely-missing-config").unwrap();

        assert_eq!(conf.api.base_url, "http://localhost:3000/api");
        assert_eq!(conf.api.timeout, Duration::from_secs(10));
        assert_eq!(conf.search.debounce, Duration::from_millis(500));
    }
}
