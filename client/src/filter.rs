//! [`Filter`] of the users list.

use common::{define_kind, pagination::Arguments};
use service::read::user::list;

/// Page sizes the users list can be shown with.
pub const PAGE_SIZES: [usize; 3] = [10, 30, 50];

define_kind! {
    #[doc = "Attribute of a `User` the search text is matched against."]
    enum SearchType {
        #[doc = "Name of a `User`."]
        Name,

        #[doc = "Email of a `User`."]
        Email,

        #[doc = "ID of a `User`."]
        Id,
    }
}

define_kind! {
    #[doc = "Activity state of the `User`s to be listed."]
    enum ActiveType {
        #[doc = "Both active and inactive `User`s."]
        All,

        #[doc = "Active `User`s only."]
        Active,

        #[doc = "Inactive `User`s only."]
        Inactive,
    }
}

impl ActiveType {
    /// Returns the activity flag to filter `User`s by, if any.
    #[must_use]
    pub fn flag(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(true),
            Self::Inactive => Some(false),
        }
    }
}

/// State of the users list controls.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Filter {
    /// 1-based index of the shown page.
    page: usize,

    /// Size of the shown page, one of [`PAGE_SIZES`].
    page_size: usize,

    /// Activity state of the listed `User`s.
    pub active: ActiveType,

    /// Attribute the [`Filter::search_text`] is matched against.
    pub search_type: SearchType,

    /// Search text, possibly empty.
    pub search_text: String,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            page: Arguments::DEFAULT_INDEX,
            page_size: Arguments::DEFAULT_SIZE,
            active: ActiveType::default(),
            search_type: SearchType::default(),
            search_text: String::new(),
        }
    }
}

/// Change of a single [`Filter`] control.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Change {
    /// Another page is selected.
    Page(usize),

    /// Another page size is selected.
    PageSize(usize),

    /// Another activity state is selected.
    Active(ActiveType),

    /// Another search attribute is selected.
    SearchType(SearchType),

    /// Search text is edited.
    SearchText(String),
}

impl Filter {
    /// Creates a new [`Filter`] out of the provided values.
    ///
    /// Zero `page` and `page_size` out of [`PAGE_SIZES`] are replaced with
    /// the defaults.
    #[must_use]
    pub fn new(
        page: usize,
        page_size: usize,
        active: ActiveType,
        search_type: SearchType,
        search_text: impl Into<String>,
    ) -> Self {
        let default = Self::default();
        Self {
            page: if page == 0 { default.page } else { page },
            page_size: if PAGE_SIZES.contains(&page_size) {
                page_size
            } else {
                default.page_size
            },
            active,
            search_type,
            search_text: search_text.into(),
        }
    }

    /// Returns the 1-based index of the shown page.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the size of the shown page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Applies the provided [`Change`] to this [`Filter`].
    ///
    /// Changing the search or the activity state returns to the first page,
    /// while changing the page size keeps the first record of the current
    /// page shown.
    ///
    /// Returns whether this [`Filter`] has actually changed. Zero pages and
    /// page sizes out of [`PAGE_SIZES`] are ignored.
    pub fn apply(&mut self, change: Change) -> bool {
        let before = self.clone();

        match change {
            Change::Page(page) => {
                if page > 0 {
                    self.page = page;
                }
            }
            Change::PageSize(size) => {
                if PAGE_SIZES.contains(&size) && size != self.page_size {
                    self.page = self
                        .page
                        .saturating_sub(1)
                        .saturating_mul(self.page_size)
                        / size
                        + 1;
                    self.page_size = size;
                }
            }
            Change::Active(active) => {
                if active != self.active {
                    self.active = active;
                    self.page = 1;
                }
            }
            Change::SearchType(search_type) => {
                if search_type != self.search_type {
                    self.search_type = search_type;
                    self.page = 1;
                }
            }
            Change::SearchText(text) => {
                if text != self.search_text {
                    self.search_text = text;
                    self.page = 1;
                }
            }
        }

        *self != before
    }

    /// Derives the [`list::Selector`] of the `User`s shown with this
    /// [`Filter`].
    ///
    /// The search text is applied to the [`Filter::search_type`] attribute
    /// only, and is omitted if empty.
    #[must_use]
    pub fn selector(&self) -> list::Selector {
        let text = (!self.search_text.is_empty())
            .then(|| self.search_text.clone());
        let (mut id, mut name, mut email) = (None, None, None);
        match self.search_type {
            SearchType::Id => id = text,
            SearchType::Name => name = text,
            SearchType::Email => email = text,
        }

        list::Selector {
            arguments: Arguments::new(Some(self.page), Some(self.page_size))
                .unwrap_or_default(),
            filter: list::Filter {
                id,
                name,
                email,
                active: self.active.flag(),
            },
        }
    }
}
