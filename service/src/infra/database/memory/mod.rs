//! In-memory [`Database`] implementation, backing the mock record store.

mod impls;

use std::{io, path::Path, sync::Arc};

use derive_more::{Display, Error as StdError, From};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracerr::Traced;
use tracing as log;

use crate::{domain::user, infra::database};
#[cfg(doc)]
use crate::infra::Database;

/// In-memory [`Database`] holding [`user::Detail`] records.
///
/// Clones share the same records.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Stored [`user::Detail`] records, in insertion order.
    users: Arc<RwLock<Vec<user::Detail>>>,
}

impl Memory {
    /// Creates a new [`Memory`] holding the provided records.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = user::Detail>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users.into_iter().collect())),
        }
    }

    /// Loads a new [`Memory`] from the [`Seed`] JSON file at the provided
    /// `path`.
    ///
    /// # Errors
    ///
    /// If the file cannot be read or doesn't contain a valid [`Seed`].
    pub async fn load(
        path: impl AsRef<Path>,
    ) -> Result<Self, Traced<database::Error>> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let Seed { users } = serde_json::from_slice(&bytes)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        log::info!("loaded {} users from `{}`", users.len(), path.display());

        Ok(Self::new(users))
    }
}

/// Contents of a seed file for [`Memory`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Seed {
    /// Initial [`user::Detail`] records.
    #[serde(default)]
    pub users: Vec<user::Detail>,
}

/// [`Memory`] database [`Error`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to read a [`Seed`] file.
    #[display("Failed to read seed file: {_0}")]
    Io(io::Error),

    /// [`Seed`] file contents are invalid.
    #[display("Invalid seed file: {_0}")]
    Json(serde_json::Error),
}
