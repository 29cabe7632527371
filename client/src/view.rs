//! Presentational renderers of `User` records.

use derive_more::Display;
use service::domain::User;

use crate::user_path;

/// Visual variant of a [`Tag`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TagVariant {
    /// Positive state.
    Success,

    /// Negative state.
    Danger,
}

/// Short colored label.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("{label}")]
pub struct Tag {
    /// [`TagVariant`] of this [`Tag`].
    pub variant: TagVariant,

    /// Text of this [`Tag`].
    pub label: &'static str,
}

impl Tag {
    /// Creates a new [`Tag`] describing the activity of a [`User`].
    #[must_use]
    pub fn activity(active: bool) -> Self {
        if active {
            Self {
                variant: TagVariant::Success,
                label: "Active",
            }
        } else {
            Self {
                variant: TagVariant::Danger,
                label: "Inactive",
            }
        }
    }
}

/// Column of the users [`Table`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Column {
    /// [`User::id`].
    Id,

    /// [`User::name`].
    Name,

    /// [`User::email`].
    Email,

    /// [`User::position`].
    Position,

    /// [`User::job_rank`].
    JobRank,

    /// [`User::active`].
    Status,

    /// Link to the detail page.
    Actions,
}

impl Column {
    /// All the [`Column`]s, in display order.
    pub const ALL: [Self; 7] = [
        Self::Id,
        Self::Name,
        Self::Email,
        Self::Position,
        Self::JobRank,
        Self::Status,
        Self::Actions,
    ];

    /// Returns the header label of this [`Column`].
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Position => "Position",
            Self::JobRank => "Job rank",
            Self::Status => "Status",
            Self::Actions => "",
        }
    }

    /// Renders the [`Cell`] of this [`Column`] for the provided [`User`].
    #[must_use]
    pub fn cell(self, user: &User) -> Cell {
        match self {
            Self::Id => Cell::Text(user.id.to_string()),
            Self::Name => Cell::Text(user.name.to_string()),
            Self::Email => Cell::Text(user.email.to_string()),
            Self::Position => Cell::Text(user.position.to_string()),
            Self::JobRank => Cell::Text(user.job_rank.to_string()),
            Self::Status => Cell::Tag(Tag::activity(user.active)),
            Self::Actions => Cell::Link {
                label: "Details",
                href: user_path(user.id.as_ref()),
            },
        }
    }
}

/// Rendered cell of a [`Table`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cell {
    /// Plain text.
    Text(String),

    /// [`Tag`].
    Tag(Tag),

    /// Navigation link.
    Link {
        /// Text of the link.
        label: &'static str,

        /// Target path of the link.
        href: String,
    },
}

/// Rendered row of a [`Table`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    /// Unique key of this [`Row`], the [`User::id`].
    pub key: String,

    /// [`Cell`]s of this [`Row`], one per [`Column`].
    pub cells: Vec<Cell>,
}

/// Table of [`User`]s.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    /// Rendered [`Row`]s.
    pub rows: Vec<Row>,
}

impl Table {
    /// Renders the provided [`User`]s into a [`Table`].
    #[must_use]
    pub fn render(users: &[User]) -> Self {
        Self {
            rows: users
                .iter()
                .map(|user| Row {
                    key: user.id.to_string(),
                    cells: Column::ALL.iter().map(|c| c.cell(user)).collect(),
                })
                .collect(),
        }
    }

    /// Returns the header labels of this [`Table`].
    #[must_use]
    pub fn headers() -> [&'static str; 7] {
        Column::ALL.map(Column::label)
    }
}
