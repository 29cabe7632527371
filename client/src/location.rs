//! Synchronization of a [`Filter`] with the address bar.

use reqwest::Url;

use crate::filter::{ActiveType, Filter, SearchType};

/// Address bar parameter holding [`Filter::page()`].
pub const PAGE: &str = "page";

/// Address bar parameter holding [`Filter::page_size()`].
pub const PAGE_SIZE: &str = "pageSize";

/// Address bar parameter holding [`Filter::search_type`].
pub const SEARCH_TYPE: &str = "searchType";

/// Address bar parameter holding [`Filter::active`], absent for
/// [`ActiveType::All`].
pub const ACTIVE: &str = "active";

/// Address bar parameter holding [`Filter::search_text`], absent if empty.
pub const SEARCH_TEXT: &str = "searchText";

/// Browser history of the address bar.
pub trait History {
    /// Returns the current [`Url`].
    fn location(&self) -> &Url;

    /// Replaces the current [`Url`] with the provided one, without
    /// navigating and without creating a new history entry.
    fn replace(&mut self, url: Url);
}

/// In-memory [`History`].
#[derive(Clone, Debug)]
pub struct MemoryHistory {
    /// Current [`Url`].
    current: Url,

    /// Number of [`History::replace()`] calls so far.
    replaces: usize,
}

impl MemoryHistory {
    /// Creates a new [`MemoryHistory`] located at the provided [`Url`].
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            current: url,
            replaces: 0,
        }
    }

    /// Returns the number of [`History::replace()`] calls so far.
    #[must_use]
    pub fn replaces(&self) -> usize {
        self.replaces
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &Url {
        &self.current
    }

    fn replace(&mut self, url: Url) {
        self.current = url;
        self.replaces += 1;
    }
}

/// Parses a [`Filter`] out of the provided [`Url`] query.
///
/// Absent or invalid parameters fall back to the [`Filter::default()`]
/// values.
#[must_use]
pub fn parse(url: &Url) -> Filter {
    let default = Filter::default();
    let (mut page, mut page_size) = (default.page(), default.page_size());
    let mut active = ActiveType::All;
    let mut search_type = SearchType::default();
    let mut search_text = String::new();

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            PAGE => page = value.parse().unwrap_or(page),
            PAGE_SIZE => page_size = value.parse().unwrap_or(page_size),
            ACTIVE => active = value.parse().unwrap_or(active),
            SEARCH_TYPE => search_type = value.parse().unwrap_or(search_type),
            SEARCH_TEXT => search_text = value.into_owned(),
            _ => {}
        }
    }

    Filter::new(page, page_size, active, search_type, search_text)
}

/// Writes the provided [`Filter`] into the query of the provided [`Url`].
///
/// Parameters unrelated to the [`Filter`] are preserved.
pub fn write(filter: &Filter, url: &mut Url) {
    const OWN: [&str; 5] = [PAGE, PAGE_SIZE, SEARCH_TYPE, ACTIVE, SEARCH_TEXT];

    let unrelated = url
        .query_pairs()
        .filter(|(key, _)| !OWN.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect::<Vec<_>>();

    let mut query = url.query_pairs_mut();
    _ = query
        .clear()
        .extend_pairs(unrelated)
        .append_pair(PAGE, &filter.page().to_string())
        .append_pair(PAGE_SIZE, &filter.page_size().to_string());
    if filter.active != ActiveType::All {
        _ = query.append_pair(ACTIVE, &filter.active.to_string());
    }
    if !filter.search_text.is_empty() {
        _ = query.append_pair(SEARCH_TEXT, &filter.search_text);
    }
    _ = query.append_pair(SEARCH_TYPE, &filter.search_type.to_string());
}

/// Writes the provided [`Filter`] into the current [`Url`] of the provided
/// [`History`], replacing it.
pub fn sync(filter: &Filter, history: &mut impl History) {
    let mut url = history.location().clone();
    write(filter, &mut url);
    history.replace(url);
}

#[cfg(test)]
mod spec {
    use reqwest::Url;

    use super::{parse, sync, write, History as _, MemoryHistory};
    use crate::filter::{ActiveType, Change, Filter, SearchType};

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn parses_defaults() {
        assert_eq!(parse(&url("http://localhost/users")), Filter::default());
        assert_eq!(
            parse(&url(
                "http://localhost/users?page=zero&pageSize=7&active=MAYBE",
            )),
            Filter::default(),
        );
    }

    #[test]
    fn accepts_huge_page() {
        let mut filter =
            parse(&url("http://localhost/users?page=18446744073709551615"));
        assert_eq!(filter.page(), usize::MAX);

        assert!(filter.apply(Change::PageSize(30)));
        assert_eq!(filter.page(), usize::MAX / 30 + 1);
    }

    #[test]
    fn writes_complete_query() {
        let mut u = url("http://localhost/users?tab=2&page=9");
        write(&Filter::default(), &mut u);

        assert_eq!(u.query(), Some("tab=2&page=1&pageSize=10&searchType=NAME"));
    }

    #[test]
    fn round_trips_filter() {
        let filters = [
            Filter::default(),
            Filter::new(3, 50, ActiveType::Active, SearchType::Email, "kim"),
            Filter::new(2, 30, ActiveType::Inactive, SearchType::Id, "a b&c"),
        ];
        for filter in filters {
            let mut u = url("http://localhost/users?tab=2");
            write(&filter, &mut u);

            assert_eq!(parse(&u), filter);
            assert!(u.query_pairs().any(|(k, v)| k == "tab" && v == "2"));
        }
    }

    #[test]
    fn omits_defaulted_params() {
        let mut u = url("http://localhost/users?active=ACTIVE&searchText=x");
        write(&Filter::default(), &mut u);

        assert!(!u.query_pairs().any(|(k, _)| k == "active"));
        assert!(!u.query_pairs().any(|(k, _)| k == "searchText"));
    }

    #[test]
    fn syncs_history_in_place() {
        let mut history = MemoryHistory::new(url("http://localhost/users"));
        sync(
            &Filter::new(2, 10, ActiveType::Inactive, SearchType::Name, ""),
            &mut history,
        );

        assert_eq!(history.replaces(), 1);
        assert_eq!(
            history.location().as_str(),
            "http://localhost/users?page=2&pageSize=10&active=INACTIVE\
             &searchType=NAME",
        );
    }
}
