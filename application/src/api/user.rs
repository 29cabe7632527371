//! `User`-related HTTP API handlers.

use axum::{
    extract::{
        self,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    Extension, Json,
};
use common::{envelope::ListPayload, Envelope};
use serde::Deserialize;
use service::{
    command::{self, Command as _},
    domain, query, read, Service,
};

use crate::{api, define_error, AsError, Error};

/// Message of a successful `User` update.
pub const UPDATED: &str = "User updated successfully";

/// Message of a successful `User` deletion.
pub const DELETED: &str = "User deleted successfully";

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "User not found"]
        NotExists,
    }
}

/// Query parameters of the `GET /api/users` endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// 1-based index of the requested page.
    pub page_index: Option<u64>,

    /// Requested page size.
    pub page_size: Option<u64>,

    /// Part of a `User` ID to search for.
    pub id: Option<String>,

    /// Part of a `User` name to search for.
    pub name: Option<String>,

    /// Part of a `User` email to search for.
    pub email: Option<String>,

    /// Exact activity flag of a `User`.
    pub active: Option<bool>,
}

impl TryFrom<ListParams> for read::user::list::Selector {
    type Error = api::PaginationError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let ListParams {
            page_index,
            page_size,
            id,
            name,
            email,
            active,
        } = params;

        Ok(Self {
            arguments: read::user::list::Arguments::new(page_index, page_size)
                .ok_or(api::PaginationError::Invalid)?,
            filter: read::user::list::Filter {
                id,
                name,
                email,
                active,
            },
        })
    }
}

/// Lists a page of `User`s matching the provided [`ListParams`].
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - the query string is malformed;
/// - `INVALID_PAGINATION_ARGUMENTS` - the page index or size is zero.
#[tracing::instrument(skip_all, fields(params = ?params))]
pub async fn list<Db: api::Backend>(
    Extension(service): Extension<Service<Db>>,
    params: Result<extract::Query<ListParams>, QueryRejection>,
) -> Result<Json<Envelope<ListPayload<domain::User>>>, Error> {
    let extract::Query(params) = params.map_err(AsError::into_error)?;
    let selector = read::user::list::Selector::try_from(params)?;

    let page = service
        .execute(query::users::List::by(selector))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Envelope::success(ListPayload {
        page_index: page.arguments.index(),
        page_size: page.arguments.size(),
        total_count: page.total_count,
        result_list: page.items,
    })))
}

/// Returns the `User` with the provided ID.
///
/// # Errors
///
/// Possible error codes:
/// - `USER_NOT_EXISTS` - the `User` with the provided ID does not exist.
#[tracing::instrument(skip_all)]
pub async fn get<Db: api::Backend>(
    Extension(service): Extension<Service<Db>>,
    id: Result<extract::Path<String>, PathRejection>,
) -> Result<Json<Envelope<domain::user::Detail>>, Error> {
    let extract::Path(id) = id.map_err(AsError::into_error)?;

    service
        .execute(query::user::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| UserError::NotExists.into())
        .map(|user| Json(Envelope::success(user)))
}

/// Partially updates the `User` with the provided ID.
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - the body is not valid `User` changes;
/// - `USER_NOT_EXISTS` - the `User` with the provided ID does not exist.
#[tracing::instrument(skip_all)]
pub async fn update<Db: api::Backend>(
    Extension(service): Extension<Service<Db>>,
    id: Result<extract::Path<String>, PathRejection>,
    changes: Result<Json<domain::user::Changes>, JsonRejection>,
) -> Result<Json<Envelope<()>>, Error> {
    let extract::Path(id) = id.map_err(AsError::into_error)?;
    let Json(changes) = changes.map_err(AsError::into_error)?;

    service
        .execute(command::UpdateUser {
            user_id: id.into(),
            changes,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Envelope::ack(UPDATED)))
}

/// Deletes the `User` with the provided ID.
///
/// # Errors
///
/// Possible error codes:
/// - `USER_NOT_EXISTS` - the `User` with the provided ID does not exist.
#[tracing::instrument(skip_all)]
pub async fn delete<Db: api::Backend>(
    Extension(service): Extension<Service<Db>>,
    id: Result<extract::Path<String>, PathRejection>,
) -> Result<Json<Envelope<()>>, Error> {
    let extract::Path(id) = id.map_err(AsError::into_error)?;

    service
        .execute(command::DeleteUser { user_id: id.into() })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Envelope::ack(DELETED)))
}

impl AsError for command::update_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => Some(UserError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => Some(UserError::NotExists.into()),
        }
    }
}
