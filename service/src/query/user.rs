//! [`Query`] collection related to a single [`User`].

use common::operations::By;

#[cfg(doc)]
use crate::{domain::User, Query};
use crate::domain::user;

use super::DatabaseQuery;

/// Queries a [`user::Detail`] by its [`user::Id`].
pub type ById = DatabaseQuery<By<Option<user::Detail>, user::Id>>;
