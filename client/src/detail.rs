//! [`DetailView`] of a single `User`.

use service::{domain::user, infra::database, query, Query, Service};
use tracerr::Traced;

use crate::{error::USER_NOT_FOUND, Failure};

/// Outcome of loading the detail page of a `User`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DetailView {
    /// `User` is loaded.
    Loaded(user::Detail),

    /// `User` doesn't exist.
    NotFound,

    /// Loading failed with the provided message.
    Failed(String),
}

impl DetailView {
    /// Loads the `User` with the provided ID.
    pub async fn load<Db>(service: &Service<Db>, id: user::Id) -> Self
    where
        Service<Db>: Query<
            query::user::ById,
            Ok = Option<user::Detail>,
            Err = Traced<database::Error>,
        >,
    {
        Self::from(fetch(service, id).await)
    }
}

impl From<Result<user::Detail, Failure>> for DetailView {
    fn from(result: Result<user::Detail, Failure>) -> Self {
        match result {
            Ok(detail) => Self::Loaded(detail),
            Err(failure) if failure.is_not_found() => Self::NotFound,
            Err(failure) => Self::Failed(failure.message),
        }
    }
}

/// Fetches the `User` with the provided ID.
///
/// # Errors
///
/// With a "not found" [`Failure`] if the `User` doesn't exist, or with any
/// other [`Failure`] if the request fails.
pub async fn fetch<Db>(
    service: &Service<Db>,
    id: user::Id,
) -> Result<user::Detail, Failure>
where
    Service<Db>: Query<
        query::user::ById,
        Ok = Option<user::Detail>,
        Err = Traced<database::Error>,
    >,
{
    service
        .execute(query::user::ById::by(id))
        .await
        .map_err(Failure::from)?
        .ok_or_else(|| Failure::not_found(USER_NOT_FOUND))
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use service::{domain::user, infra::Memory, Service};

    use super::DetailView;
    use crate::Failure;

    fn detail() -> user::Detail {
        serde_json::from_value(json!({
            "id": "u1",
            "seq_no": "1",
            "name": "Kim",
            "job_rank": "Manager",
            "position": "Sales",
            "email": "kim@example.com",
            "active": true,
            "ip_address": "10.0.0.1",
            "join_date": "2023-04-01",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn loads_existing_user() {
        let service = Service::new(Memory::new([detail()]));

        assert_eq!(
            DetailView::load(&service, "u1".into()).await,
            DetailView::Loaded(detail()),
        );
    }

    #[tokio::test]
    async fn shows_not_found_view() {
        let service = Service::new(Memory::new([detail()]));

        assert_eq!(
            DetailView::load(&service, "u2".into()).await,
            DetailView::NotFound,
        );
    }

    #[test]
    fn shows_failure_message_verbatim() {
        let view = DetailView::from(Err(Failure {
            status: 502,
            message: "API request failed: 502 Bad Gateway".into(),
        }));

        assert_eq!(
            view,
            DetailView::Failed("API request failed: 502 Bad Gateway".into()),
        );
    }
}
