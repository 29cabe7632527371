//! HTTP API definitions.

pub mod user;

use std::time;

use axum::{
    extract::MatchedPath,
    routing::get,
    Extension, Router,
};
use axum_client_ip::InsecureClientIp;
use common::operations::{By, Delete, Select, Update};
use service::{
    domain,
    infra::{database, Database},
    read, Service,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracerr::Traced;

use crate::define_error;

/// [`Database`] able to back the whole HTTP API.
pub trait Backend:
    Database<
        Select<By<read::user::list::Page, read::user::list::Selector>>,
        Ok = read::user::list::Page,
        Err = Traced<database::Error>,
    > + Database<
        Select<By<Option<domain::user::Detail>, domain::user::Id>>,
        Ok = Option<domain::user::Detail>,
        Err = Traced<database::Error>,
    > + Database<
        Update<(domain::user::Id, domain::user::Changes)>,
        Ok = bool,
        Err = Traced<database::Error>,
    > + Database<
        Delete<domain::user::Id>,
        Ok = bool,
        Err = Traced<database::Error>,
    > + Clone
    + Send
    + Sync
    + 'static
{
}

impl<Db> Backend for Db where
    Db: Database<
            Select<
                By<read::user::list::Page, read::user::list::Selector>,
            >,
            Ok = read::user::list::Page,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<domain::user::Detail>, domain::user::Id>>,
            Ok = Option<domain::user::Detail>,
            Err = Traced<database::Error>,
        > + Database<
            Update<(domain::user::Id, domain::user::Changes)>,
            Ok = bool,
            Err = Traced<database::Error>,
        > + Database<
            Delete<domain::user::Id>,
            Ok = bool,
            Err = Traced<database::Error>,
        > + Clone
        + Send
        + Sync
        + 'static
{
}

/// Builds the [`Router`] serving the `users` API on top of the provided
/// [`Service`].
///
/// Every request is traced within an `HTTP request` [`tracing::Span`].
pub fn router<Db: Backend>(service: Service<Db>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/users", get(user::list::<Db>))
        .route(
            "/api/users/:id",
            get(user::get::<Db>)
                .post(user::update::<Db>)
                .delete(user::delete::<Db>),
        )
        .layer(Extension(service))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|r: &http::Request<_>| {
                    tracing::info_span!(
                        "HTTP request",
                        http.client_ip = InsecureClientIp::from(
                            r.headers(),
                            r.extensions()
                        )
                            .map(|ip| ip.0.to_string())
                            .ok(),
                        http.flavor = ?r.version(),
                        http.host = r.uri().host(),
                        http.method = r.method().as_str(),
                        http.route = r
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str),
                        http.target = r
                            .uri()
                            .path_and_query()
                            .map(http::uri::PathAndQuery::as_str),
                        http.user_agent = r
                            .headers()
                            .get(http::header::USER_AGENT)
                            .and_then(|h| h.to_str().ok()),
                        http.status_code = tracing::field::Empty,
                    )
                })
                .on_response(
                    |r: &http::Response<_>,
                     dur: time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(r.status().as_u16()),
                        );

                        if r.status().is_server_error() {
                            tracing::error!(
                                duration = format!("{}ms", dur.as_millis()),
                            );
                        } else {
                            tracing::info!(
                                duration = format!("{}ms", dur.as_millis()),
                            );
                        }
                    },
                ),
        )
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "`page_index` and `page_size` must be positive"]
        Invalid,
    }
}
