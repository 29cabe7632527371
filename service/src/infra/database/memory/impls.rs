//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Delete, Select, Update};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user,
    infra::{
        database::{self, Memory},
        Database,
    },
    read::user::list,
};

impl Database<Select<By<list::Page, list::Selector>>> for Memory {
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector { arguments, filter } = by.into_inner();

        let users = self.users.read().await;
        Ok(list::Page::slice(
            arguments,
            users
                .iter()
                .map(|d| &d.user)
                .filter(|u| filter.matches(u))
                .cloned(),
        ))
    }
}

impl Database<Select<By<Option<user::Detail>, user::Id>>> for Memory {
    type Ok = Option<user::Detail>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<user::Detail>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|d| d.user.id == id)
            .cloned())
    }
}

impl Database<Update<(user::Id, user::Changes)>> for Memory {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update((id, changes)): Update<(user::Id, user::Changes)>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut users = self.users.write().await;
        let Some(detail) = users.iter_mut().find(|d| d.user.id == id) else {
            return Ok(false);
        };
        detail.apply(changes);
        Ok(true)
    }
}

impl Database<Delete<user::Id>> for Memory {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<user::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|d| d.user.id != id);
        Ok(users.len() != before)
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Select, Update};
    use serde_json::json;

    use crate::{
        domain::user,
        infra::{Database as _, Memory},
        read::user::list,
    };

    fn detail(n: usize, active: bool) -> user::Detail {
        serde_json::from_value(json!({
            "id": format!("user{n:02}"),
            "seq_no": n.to_string(),
            "name": if n % 2 == 0 { format!("Kim {n}") } else { format!("Lee {n}") },
            "job_rank": "Engineer",
            "position": "Platform",
            "email": format!("user{n}@example.com"),
            "active": active,
            "ip_address": "10.0.0.1",
            "join_date": "2024-01-01",
        }))
        .unwrap()
    }

    /// 25 active records followed by 5 inactive ones.
    fn memory() -> Memory {
        Memory::new((0..30).map(|n| detail(n, n < 25)))
    }

    async fn list(memory: &Memory, selector: list::Selector) -> list::Page {
        memory.execute(Select(By::new(selector))).await.unwrap()
    }

    #[tokio::test]
    async fn lists_second_page_of_active_users() {
        let page = list(
            &memory(),
            list::Selector {
                arguments: list::Arguments::new(Some(2_u32), Some(10))
                    .unwrap(),
                filter: list::Filter {
                    active: Some(true),
                    ..list::Filter::default()
                },
            },
        )
        .await;

        assert_eq!(page.total_count, 25);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].id.as_ref(), "user10");
        assert!(page.items.iter().all(|u| u.active));
    }

    #[tokio::test]
    async fn filters_by_substrings() {
        let memory = memory();

        let page = list(
            &memory,
            list::Selector {
                filter: list::Filter {
                    name: Some("Kim".into()),
                    active: Some(false),
                    ..list::Filter::default()
                },
                ..list::Selector::default()
            },
        )
        .await;
        assert_eq!(page.total_count, 2);

        let page = list(
            &memory,
            list::Selector {
                filter: list::Filter {
                    email: Some("user2".into()),
                    id: Some(String::new()),
                    ..list::Filter::default()
                },
                ..list::Selector::default()
            },
        )
        .await;
        // `user2@`, `user20@`..`user29@`
        assert_eq!(page.total_count, 11);
    }

    #[tokio::test]
    async fn merges_updates() {
        let memory = memory();
        let id = user::Id::from("user03");

        let existed = memory
            .execute(Update((
                id.clone(),
                user::Changes {
                    name: user::Name::new("Park"),
                    ..user::Changes::default()
                },
            )))
            .await
            .unwrap();
        assert!(existed);

        let detail = memory
            .execute(Select(By::<Option<user::Detail>, _>::new(id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.user.name.as_ref(), "Park");
        assert_eq!(detail.user.email.as_ref(), "user3@example.com");

        let existed = memory
            .execute(Update((
                user::Id::from("missing"),
                user::Changes::default(),
            )))
            .await
            .unwrap();
        assert!(!existed);
    }

    #[tokio::test]
    async fn deletes_once() {
        let memory = memory();
        let id = user::Id::from("user07");

        assert!(memory.execute(Delete(id.clone())).await.unwrap());
        assert!(!memory.execute(Delete(id.clone())).await.unwrap());
        assert!(memory
            .execute(Select(By::<Option<user::Detail>, _>::new(id)))
            .await
            .unwrap()
            .is_none());
    }
}
