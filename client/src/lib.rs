//! Headless client of the user administration system.
//!
//! Holds the state of the users list, detail and edit pages, while leaving
//! the actual rendering to the UI toolkit.

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

pub mod config;
pub mod debounce;
pub mod detail;
pub mod dialog;
pub mod edit;
pub mod error;
pub mod filter;
pub mod list;
pub mod location;
pub mod pagination;
pub mod view;

#[cfg(test)]
use serde_json as _;

pub use self::{
    config::Config,
    error::Failure,
    filter::{ActiveType, Change, Filter, SearchType},
    list::ListController,
};

/// Navigation between client pages.
pub trait Navigator {
    /// Navigates to the provided `path`, creating a new history entry.
    fn push(&mut self, path: String);
}

/// Path of the users list page.
pub const USERS_PATH: &str = "/users";

/// Returns the path of the detail page of the `User` with the provided `id`.
#[must_use]
pub fn user_path(id: &str) -> String {
    format!("{USERS_PATH}/{id}")
}

/// Returns the path of the edit page of the `User` with the provided `id`.
#[must_use]
pub fn user_edit_path(id: &str) -> String {
    format!("{USERS_PATH}/{id}/edit")
}
