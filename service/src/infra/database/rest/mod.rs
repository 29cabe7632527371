//! REST [`Database`] implementation, forwarding operations to a remote
//! record store speaking the [`Envelope`] wire contract.

mod impls;

use std::time;

use common::Envelope;
use derive_more::{Debug, Display, Error as StdError, From};
use reqwest::{RequestBuilder, StatusCode, Url};
use secrecy::{ExposeSecret as _, SecretString};
use serde::de::DeserializeOwned;
use tracerr::Traced;
use tracing as log;

use crate::infra::database;
#[cfg(doc)]
use crate::infra::Database;

/// [`Rest`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the remote API, e.g. `http://localhost:3001/api`.
    pub base_url: String,

    /// Key sent as a `Bearer` token in the `Authorization` header.
    #[debug(skip)]
    pub auth_key: SecretString,

    /// Timeout of a single request.
    pub timeout: time::Duration,
}

/// REST [`Database`] client.
///
/// Holds no state between requests apart from the pooled connections.
#[derive(Clone, Debug)]
pub struct Rest {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base URL of the remote API.
    base_url: Url,

    /// Key sent as a `Bearer` token in the `Authorization` header.
    #[debug(skip)]
    auth_key: SecretString,
}

impl Rest {
    /// Creates a new [`Rest`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the [`Config::base_url`] is invalid or the HTTP client cannot be
    /// initialized.
    pub fn new(conf: &Config) -> Result<Self, Traced<database::Error>> {
        let base_url = Url::parse(&conf.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| Error::InvalidBaseUrl(conf.base_url.clone()))
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(Self {
            client,
            base_url,
            auth_key: conf.auth_key.clone(),
        })
    }

    /// Returns the URL of the `users` collection, or of a single user if the
    /// `id` is provided.
    fn users_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            _ = segments.pop_if_empty().push("users");
            if let Some(id) = id {
                _ = segments.push(id);
            }
        }
        url
    }

    /// Sends the provided request, parsing the response [`Envelope`].
    ///
    /// [`None`] is returned if the remote API responds with
    /// [`StatusCode::NOT_FOUND`].
    async fn send<T>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<Envelope<T>>, Traced<database::Error>>
    where
        T: DeserializeOwned,
    {
        let response = request
            .bearer_auth(self.auth_key.expose_secret())
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        log::debug!("remote API responded with `{status}`");

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = serde_json::from_slice::<Envelope<()>>(&body)
                .map(|e| e.meta.message)
                .unwrap_or_else(|_| format!("API request failed: {status}"));
            return Err(tracerr::new!(Error::Status { status, message }))
                .map_err(tracerr::map_from);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| Error::Malformed(e.to_string()))
            .map_err(tracerr::wrap!())
            .map_err(tracerr::map_from)
    }
}

/// [`Rest`] database [`Error`].
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// Configured base URL is not a valid base URL.
    #[display("Invalid base URL: `{_0}`")]
    #[from(ignore)]
    InvalidBaseUrl(#[error(not(source))] String),

    /// Request could not be performed.
    #[display("Request failed: {_0}")]
    Transport(reqwest::Error),

    /// Remote API responded with a non-success status.
    #[display("{message}")]
    #[from(ignore)]
    Status {
        /// [`StatusCode`] of the response.
        status: StatusCode,

        /// Message reported by the remote API.
        message: String,
    },

    /// Response body doesn't have the expected shape.
    #[display("Malformed response: {_0}")]
    #[from(ignore)]
    Malformed(#[error(not(source))] String),
}

impl Error {
    /// Returns the [`StatusCode`] describing this [`Error`].
    ///
    /// Anything but a status reported by the remote API is an internal
    /// error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Status { status, .. } => *status,
            Self::InvalidBaseUrl(_)
            | Self::Transport(_)
            | Self::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
