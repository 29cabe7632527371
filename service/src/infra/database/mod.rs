//! [`Database`]-related implementations.

pub mod memory;
#[cfg(feature = "rest")]
pub mod rest;

use derive_more::{Display, Error as StdError, From};

pub use self::memory::Memory;
#[cfg(feature = "rest")]
pub use self::rest::Rest;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Memory`] error.
    Memory(memory::Error),

    #[cfg(feature = "rest")]
    /// [`Rest`] error.
    Rest(rest::Error),
}
