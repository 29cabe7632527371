//! Abstractions for page-index pagination.

use std::num::NonZeroUsize;

/// A page of `I`tems.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<I> {
    /// [`Arguments`] this [`Page`] was selected with.
    pub arguments: Arguments,

    /// Total count of items matching the filter, across all pages.
    pub total_count: usize,

    /// Items on this [`Page`].
    pub items: Vec<I>,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] by slicing the provided filtered `items`
    /// according to the provided [`Arguments`].
    #[must_use]
    pub fn slice(args: Arguments, items: impl IntoIterator<Item = I>) -> Self {
        let (offset, size) = (args.offset(), args.size());

        let mut total_count = 0;
        let mut page = Vec::new();
        for (n, item) in items.into_iter().enumerate() {
            total_count = n + 1;
            if n >= offset && page.len() < size {
                page.push(item);
            }
        }

        Self {
            arguments: args,
            total_count,
            items: page,
        }
    }

    /// Maps items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<T>(self, f: impl FnMut(I) -> T) -> Page<T> {
        Page {
            arguments: self.arguments,
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }

    /// Returns the total number of pages for the [`Page::total_count`].
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.arguments.size())
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// 1-based index of the requested page.
    index: NonZeroUsize,

    /// Maximum number of items on the requested page.
    size: NonZeroUsize,
}

impl Arguments {
    /// Default page index.
    pub const DEFAULT_INDEX: usize = 1;

    /// Default page size.
    pub const DEFAULT_SIZE: usize = 10;

    /// Creates new [`Arguments`] out of the provided page `index` and `size`.
    ///
    /// Missing values are replaced with [`Arguments::DEFAULT_INDEX`] and
    /// [`Arguments::DEFAULT_SIZE`].
    ///
    /// [`None`] is returned if any of the values is zero.
    pub fn new<Num>(index: Option<Num>, size: Option<Num>) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        let index = match index {
            Some(i) => i.try_into().ok()?,
            None => Self::DEFAULT_INDEX,
        };
        let size = match size {
            Some(s) => s.try_into().ok()?,
            None => Self::DEFAULT_SIZE,
        };
        Some(Self {
            index: NonZeroUsize::new(index)?,
            size: NonZeroUsize::new(size)?,
        })
    }

    /// Returns the 1-based index of the requested page.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// Returns the maximum number of items on the requested page.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// Returns the number of items preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.index() - 1).saturating_mul(self.size())
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            index: NonZeroUsize::MIN,
            size: NonZeroUsize::new(Self::DEFAULT_SIZE)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Pagination selector.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}
