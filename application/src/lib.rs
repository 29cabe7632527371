//! Application provides HTTP API for interacting with the [`Service`].
//!
//! [`Service`]: service::Service

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
pub mod error;
pub mod logging;

use std::io;

use axum::Router;
use tokio::net::TcpListener;
use tracing as log;
// Used in integration tests.
#[cfg(test)]
use reqwest as _;
#[cfg(test)]
use serde_json as _;

pub use self::{
    args::Args,
    config::Config,
    error::{AsError, Error},
};

/// Serves the provided `app` on the address of the provided
/// [`config::Server`] until the server fails.
///
/// # Errors
///
/// If the address cannot be listened on, or the server fails.
pub async fn serve(server: &config::Server, app: Router) -> io::Result<()> {
    let listener = TcpListener::bind((server.host.as_str(), server.port)).await?;

    log::info!("listening on `{}:{}`", server.host, server.port);

    axum::serve(listener, app).await
}
