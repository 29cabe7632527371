//! [`Failure`] definitions.

use derive_more::{Display, Error};
use service::{command, infra::database};
use tracerr::Traced;

/// Status of a "not found" [`Failure`].
const NOT_FOUND: u16 = 404;

/// Status of any [`Failure`] not reported by the API.
const INTERNAL: u16 = 500;

/// Message of a [`Failure`] caused by a missing `User`.
pub const USER_NOT_FOUND: &str = "User not found";

/// Failed request to the API, as surfaced to the user.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("{message}")]
pub struct Failure {
    /// HTTP status of this [`Failure`].
    pub status: u16,

    /// Human-readable message of this [`Failure`].
    #[error(not(source))]
    pub message: String,
}

impl Failure {
    /// Creates a "not found" [`Failure`] with the provided `message`.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: NOT_FOUND,
            message: message.into(),
        }
    }

    /// Indicates whether this [`Failure`] means the requested record doesn't
    /// exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == NOT_FOUND
    }
}

impl From<&database::Error> for Failure {
    fn from(err: &database::Error) -> Self {
        let status = match err {
            database::Error::Rest(e) => e.status().as_u16(),
            database::Error::Memory(_) => INTERNAL,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<Traced<database::Error>> for Failure {
    fn from(err: Traced<database::Error>) -> Self {
        tracing::debug!("request failed: {err}");
        Self::from(err.as_ref())
    }
}

impl From<Traced<command::update_user::ExecutionError>> for Failure {
    fn from(err: Traced<command::update_user::ExecutionError>) -> Self {
        use command::update_user::ExecutionError as E;

        tracing::debug!("update failed: {err}");
        match err.as_ref() {
            E::Db(e) => Self::from(e),
            E::UserNotExists(_) => Self::not_found(USER_NOT_FOUND),
        }
    }
}

impl From<Traced<command::delete_user::ExecutionError>> for Failure {
    fn from(err: Traced<command::delete_user::ExecutionError>) -> Self {
        use command::delete_user::ExecutionError as E;

        tracing::debug!("deletion failed: {err}");
        match err.as_ref() {
            E::Db(e) => Self::from(e),
            E::UserNotExists(_) => Self::not_found(USER_NOT_FOUND),
        }
    }
}
