//! [`ListController`] of the users list page.

use reqwest::Url;
use service::{
    domain::User, infra::database, query, read::user::list, Query, Service,
};
use tracerr::Traced;

use crate::{
    filter::{Change, Filter},
    location::{self, History},
    pagination::Pagination,
    view::Table,
    Failure,
};

/// Message notified when the users list fails to load.
pub const LOAD_FAILED: &str = "Failed to load the users list.";

/// Notifier of failures, shown to the user as an alert.
pub trait Notifier {
    /// Notifies the user with the provided `message`.
    fn notify(&mut self, message: &str);
}

/// Data of the users list page, loaded before the [`ListController`] is
/// mounted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitialData {
    /// `User`s on the shown page.
    pub users: Vec<User>,

    /// Total count of the `User`s matching the [`InitialData::filter`].
    pub total_count: usize,

    /// [`Filter`] parsed from the page [`Url`].
    pub filter: Filter,
}

impl InitialData {
    /// Loads the [`InitialData`] of the page at the provided [`Url`].
    ///
    /// # Errors
    ///
    /// If the users list fails to load.
    pub async fn load<Db>(
        service: &Service<Db>,
        url: &Url,
    ) -> Result<Self, Failure>
    where
        Service<Db>: Query<
            query::users::List,
            Ok = list::Page,
            Err = Traced<database::Error>,
        >,
    {
        let filter = location::parse(url);
        let page = service
            .execute(query::users::List::by(filter.selector()))
            .await?;

        Ok(Self {
            users: page.items,
            total_count: page.total_count,
            filter,
        })
    }
}

/// Request of a users list page, issued by [`ListController::dispatch()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    /// Sequence number of this [`Request`].
    seq: u64,

    /// [`Filter`] this [`Request`] was issued with.
    filter: Filter,
}

impl Request {
    /// Returns the [`Filter`] this [`Request`] was issued with.
    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

/// Fetches the users list page of the provided [`Request`].
///
/// # Errors
///
/// If the users list fails to load.
pub async fn fetch<Db>(
    service: &Service<Db>,
    request: &Request,
) -> Result<list::Page, Failure>
where
    Service<Db>:
        Query<query::users::List, Ok = list::Page, Err = Traced<database::Error>>,
{
    service
        .execute(query::users::List::by(request.filter.selector()))
        .await
        .map_err(Failure::from)
}

/// Outcome of [`ListController::complete()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Completion {
    /// Fetched page is shown.
    Applied,

    /// Failure is notified, the shown page is kept.
    Failed,

    /// Newer [`Request`] was dispatched meanwhile, so the result is
    /// discarded.
    Stale,
}

/// Controller of the users list page.
///
/// Owns the [`Filter`], the shown `User`s and their total count, and
/// projects the [`Filter`] into the address bar [`History`].
#[derive(Debug)]
pub struct ListController<H, N> {
    /// Current [`Filter`].
    filter: Filter,

    /// Shown `User`s.
    users: Vec<User>,

    /// Total count of the `User`s matching the [`Filter`].
    total_count: usize,

    /// Address bar [`History`].
    history: H,

    /// [`Notifier`] of failures.
    notifier: N,

    /// Sequence number of the last dispatched [`Request`].
    dispatched: u64,

    /// Sequence number of the last completed [`Request`].
    completed: u64,
}

impl<H: History, N: Notifier> ListController<H, N> {
    /// Creates a new [`ListController`] showing the provided [`InitialData`].
    #[must_use]
    pub fn new(initial: InitialData, history: H, notifier: N) -> Self {
        let InitialData {
            users,
            total_count,
            filter,
        } = initial;
        Self {
            filter,
            users,
            total_count,
            history,
            notifier,
            dispatched: 0,
            completed: 0,
        }
    }

    /// Mounts this [`ListController`], completing the address bar with the
    /// [`Filter`] parameters.
    ///
    /// The [`InitialData`] is shown as is, without any fetching.
    pub fn mount(&mut self) {
        location::sync(&self.filter, &mut self.history);
    }

    /// Returns the current [`Filter`].
    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Returns the shown `User`s.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns the total count of the `User`s matching the [`Filter`].
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Indicates whether the last dispatched [`Request`] is not completed
    /// yet.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.completed < self.dispatched
    }

    /// Returns the address bar [`History`].
    #[must_use]
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns the [`Notifier`] of failures.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the [`Pagination`] control state.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination {
            total: self.total_count,
            current: self.filter.page(),
            page_size: self.filter.page_size(),
        }
    }

    /// Renders the shown `User`s into a [`Table`].
    #[must_use]
    pub fn table(&self) -> Table {
        Table::render(&self.users)
    }

    /// Applies the provided [`Change`] to the [`Filter`], returning the
    /// [`Request`] to be fetched.
    ///
    /// [`None`] is returned if the [`Filter`] hasn't changed.
    pub fn dispatch(&mut self, change: Change) -> Option<Request> {
        if !self.filter.apply(change) {
            return None;
        }

        self.dispatched += 1;
        tracing::debug!("dispatching users request #{}", self.dispatched);
        Some(Request {
            seq: self.dispatched,
            filter: self.filter.clone(),
        })
    }

    /// Completes the provided [`Request`] with its fetched `result`.
    ///
    /// Results of [`Request`]s older than the last dispatched one are
    /// discarded, whether successful or not.
    pub fn complete(
        &mut self,
        request: Request,
        result: Result<list::Page, Failure>,
    ) -> Completion {
        if request.seq < self.dispatched {
            tracing::debug!("discarding stale users response #{}", request.seq);
            return Completion::Stale;
        }
        self.completed = request.seq;

        match result {
            Ok(page) => {
                self.users = page.items;
                self.total_count = page.total_count;
                location::sync(&request.filter, &mut self.history);
                Completion::Applied
            }
            Err(failure) => {
                tracing::warn!("failed to load users: {failure}");
                self.notifier.notify(LOAD_FAILED);
                Completion::Failed
            }
        }
    }

    /// Applies the provided [`Change`], fetching and showing the resulting
    /// page.
    ///
    /// [`None`] is returned if the [`Filter`] hasn't changed.
    pub async fn update<Db>(
        &mut self,
        service: &Service<Db>,
        change: Change,
    ) -> Option<Completion>
    where
        Service<Db>: Query<
            query::users::List,
            Ok = list::Page,
            Err = Traced<database::Error>,
        >,
    {
        let request = self.dispatch(change)?;
        let result = fetch(service, &request).await;
        Some(self.complete(request, result))
    }
}
