//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error as StdError, From};
use secrecy::SecretString;
use serde::Deserialize;
use service::infra::rest;
use smart_default::SmartDefault;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Proxy API server configuration.
    #[serde(default)]
    pub server: Server,

    /// Configuration of the record store the proxy forwards requests to.
    #[serde(default)]
    pub store: Store,

    /// Mock record store configuration.
    #[serde(default)]
    pub record_store: RecordStore,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
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
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// HTTP server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(3000)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    ///
    /// `*` allows any origin.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

impl Cors {
    /// Builds a [`CorsLayer`] allowing the configured origins.
    ///
    /// # Errors
    ///
    /// If any of the configured origins is not a valid header value.
    pub fn layer(&self) -> Result<CorsLayer, InvalidOrigin> {
        let origin = if self.origins.iter().any(|o| o == "*") {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(
                self.origins
                    .iter()
                    .map(|origin| {
                        origin
                            .parse::<http::HeaderValue>()
                            .map_err(|_| InvalidOrigin(origin.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };

        Ok(CorsLayer::new()
            .allow_methods([
                http::Method::DELETE,
                http::Method::GET,
                http::Method::OPTIONS,
                http::Method::POST,
            ])
            .allow_headers([
                http::header::AUTHORIZATION,
                http::header::CONTENT_TYPE,
            ])
            .allow_origin(origin))
    }
}

/// Error of a configured [CORS] origin not being a valid header value.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Display, From, StdError)]
#[display("`{_0}` is not a valid CORS origin")]
pub struct InvalidOrigin(#[error(not(source))] String);

/// Configuration of the record store the proxy forwards requests to.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Store {
    /// Base URL of the record store API.
    #[default("http://localhost:3001/api".to_owned())]
    pub base_url: String,

    /// Key to authorize requests to the record store with.
    #[default(SecretString::from("api-key"))]
    pub auth_key: SecretString,

    /// Timeout of a single request to the record store.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Store> for rest::Config {
    fn from(value: Store) -> Self {
        let Store {
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

/// Mock record store configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct RecordStore {
    /// HTTP server configuration of the record store.
    #[default(Server { port: 3001, ..Server::default() })]
    pub server: Server,

    /// Path to the JSON file to seed the record store with.
    ///
    /// The record store starts empty if none is provided.
    pub seed: Option<PathBuf>,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use secrecy::ExposeSecret as _;

    use super::{Config, Cors};

    #[test]
    fn defaults_without_sources() {
        let conf = Config::new("definitely-missing-config").unwrap();

        assert_eq!(conf.server.port, 3000);
        assert_eq!(conf.record_store.server.port, 3001);
        assert!(conf.record_store.seed.is_none());
        assert_eq!(conf.store.base_url, "http://localhost:3001/api");
        assert_eq!(conf.store.auth_key.expose_secret(), "api-key");
        assert_eq!(conf.store.timeout, Duration::from_secs(10));
    }

    #[test]
    fn builds_cors_layer() {
        assert!(Cors::default().layer().is_ok());
        assert!(Cors {
            origins: vec!["http://localhost:3000".into()],
        }
        .layer()
        .is_ok());
        assert!(Cors {
            origins: vec!["bad\norigin".into()],
        }
        .layer()
        .is_err());
    }
}
