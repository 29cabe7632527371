//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

pub mod list {
    //! [`User`]s list definitions.

    use common::define_pagination;

    use crate::domain::User;

    define_pagination!(User, Filter);

    /// Filter for [`Selector`].
    ///
    /// Empty search values are equivalent to absent ones.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// Part of a [`User`] ID to search for.
        pub id: Option<String>,

        /// Part of a [`User`] name to search for.
        pub name: Option<String>,

        /// Part of a [`User`] email to search for.
        pub email: Option<String>,

        /// Exact activity flag of a [`User`].
        pub active: Option<bool>,
    }

    impl Filter {
        /// Returns the [`Filter::id`] search value, if it's not empty.
        #[must_use]
        pub fn id(&self) -> Option<&str> {
            non_empty(self.id.as_deref())
        }

        /// Returns the [`Filter::name`] search value, if it's not empty.
        #[must_use]
        pub fn name(&self) -> Option<&str> {
            non_empty(self.name.as_deref())
        }

        /// Returns the [`Filter::email`] search value, if it's not empty.
        #[must_use]
        pub fn email(&self) -> Option<&str> {
            non_empty(self.email.as_deref())
        }

        /// Checks whether the provided [`User`] matches this [`Filter`].
        ///
        /// Search values match as substrings, while [`Filter::active`]
        /// matches exactly.
        #[must_use]
        pub fn matches(&self, user: &User) -> bool {
            let contains = |field: &str, part: Option<&str>| {
                part.map_or(true, |p| field.contains(p))
            };

            contains(user.id.as_ref(), self.id())
                && contains(user.name.as_ref(), self.name())
                && contains(user.email.as_ref(), self.email())
                && self.active.map_or(true, |a| user.active == a)
        }
    }

    /// Filters out empty strings.
    fn non_empty(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.is_empty())
    }
}
