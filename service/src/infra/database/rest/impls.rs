//! [`User`]-related [`Database`] implementations.

use common::{
    envelope::ListPayload,
    operations::{By, Delete, Select, Update},
};
use serde::Serialize;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{self, user},
    infra::{
        database::{self, rest::Error, Rest},
        Database,
    },
    read::user::list,
};

/// Query string of a list request.
///
/// Absent and empty search values are never transmitted.
#[derive(Debug, Serialize)]
struct ListQuery<'a> {
    /// 1-based index of the requested page.
    page_index: usize,

    /// Requested page size.
    page_size: usize,

    /// Part of a [`User`] ID to search for.
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,

    /// Part of a [`User`] name to search for.
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,

    /// Part of a [`User`] email to search for.
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,

    /// Exact activity flag of a [`User`].
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<bool>,
}

impl<'a> From<&'a list::Selector> for ListQuery<'a> {
    fn from(selector: &'a list::Selector) -> Self {
        let list::Selector { arguments, filter } = selector;
        Self {
            page_index: arguments.index(),
            page_size: arguments.size(),
            id: filter.id(),
            name: filter.name(),
            email: filter.email(),
            active: filter.active,
        }
    }
}

impl Database<Select<By<list::Page, list::Selector>>> for Rest {
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let arguments = selector.arguments;

        let request = self
            .client
            .get(self.users_url(None))
            .query(&ListQuery::from(&selector));
        log::debug!("listing users: {selector:?}");

        let ListPayload {
            page_index,
            page_size,
            total_count,
            result_list,
        } = self
            .send::<ListPayload<domain::User>>(request)
            .await
            .map_err(tracerr::wrap!())?
            .and_then(|envelope| envelope.data)
            .ok_or_else(|| Error::Malformed("missing list payload".into()))
            .map_err(tracerr::wrap!())
            .map_err(tracerr::map_from)?;

        // Server-side clamping must not pass unnoticed.
        if (page_index, page_size) != (arguments.index(), arguments.size()) {
            return Err(tracerr::new!(Error::Malformed(format!(
                "page `{page_index}/{page_size}` returned for requested \
                 `{}/{}`",
                arguments.index(),
                arguments.size(),
            ))))
            .map_err(tracerr::map_from);
        }

        Ok(list::Page {
            arguments,
            total_count,
            items: result_list,
        })
    }
}

impl Database<Select<By<Option<user::Detail>, user::Id>>> for Rest {
    type Ok = Option<user::Detail>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<user::Detail>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let request = self.client.get(self.users_url(Some(id.as_ref())));
        let Some(envelope) = self
            .send::<user::Detail>(request)
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        envelope
            .data
            .map(Some)
            .ok_or_else(|| Error::Malformed("missing user payload".into()))
            .map_err(tracerr::wrap!())
            .map_err(tracerr::map_from)
    }
}

impl Database<Update<(user::Id, user::Changes)>> for Rest {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update((id, changes)): Update<(user::Id, user::Changes)>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = self
            .client
            .post(self.users_url(Some(id.as_ref())))
            .json(&changes);
        Ok(self
            .send::<serde_json::Value>(request)
            .await
            .map_err(tracerr::wrap!())?
            .is_some())
    }
}

impl Database<Delete<user::Id>> for Rest {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<user::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = self.client.delete(self.users_url(Some(id.as_ref())));
        Ok(self
            .send::<serde_json::Value>(request)
            .await
            .map_err(tracerr::wrap!())?
            .is_some())
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::pagination::Arguments;

    use super::ListQuery;
    use crate::{
        infra::{rest, Rest},
        read::user::list,
    };

    fn rest(base_url: &str) -> Rest {
        Rest::new(&rest::Config {
            base_url: base_url.into(),
            auth_key: "key".into(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn builds_users_urls() {
        let api = rest("http://localhost:3001/api");
        assert_eq!(
            api.users_url(None).as_str(),
            "http://localhost:3001/api/users",
        );
        assert_eq!(
            api.users_url(Some("a b/c")).as_str(),
            "http://localhost:3001/api/users/a%20b%2Fc",
        );

        let slashed = rest("http://localhost:3000/api/");
        assert_eq!(
            slashed.users_url(Some("u1")).as_str(),
            "http://localhost:3000/api/users/u1",
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(Rest::new(&rest::Config {
            base_url: "mailto:admin@example.com".into(),
            auth_key: "key".into(),
            timeout: Duration::from_secs(1),
        })
        .is_err());
    }

    #[test]
    fn omits_empty_query_values() {
        let selector = list::Selector {
            arguments: Arguments::new(Some(1_u32), Some(10)).unwrap(),
            filter: list::Filter {
                id: Some(String::new()),
                email: Some("kim".into()),
                ..list::Filter::default()
            },
        };

        assert_eq!(
            serde_json::to_value(ListQuery::from(&selector)).unwrap(),
            serde_json::json!({
                "page_index": 1,
                "page_size": 10,
                "email": "kim",
            }),
        );
    }
}
