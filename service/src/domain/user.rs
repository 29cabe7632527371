//! [`User`] definitions.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display, From, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Administered user record, as projected into lists.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// Sequence number of this [`User`], used for display only.
    pub seq_no: SeqNo,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`JobRank`] of this [`User`].
    pub job_rank: JobRank,

    /// [`Position`] (department) of this [`User`].
    pub position: Position,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// Indicator whether this [`User`]'s account is active.
    pub active: bool,
}

/// Detailed [`User`] record.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Detail {
    /// [`User`] fields of this [`Detail`].
    #[serde(flatten)]
    pub user: User,

    /// [`IpAddress`] of the [`User`].
    pub ip_address: IpAddress,

    /// [`JoinDate`] of the [`User`].
    pub join_date: JoinDate,
}

impl Detail {
    /// Merges the provided [`Changes`] into this [`Detail`].
    ///
    /// Fields absent in the [`Changes`] are retained.
    pub fn apply(&mut self, changes: Changes) {
        let Changes {
            name,
            job_rank,
            position,
            email,
            ip_address,
            active,
            join_date,
        } = changes;

        if let Some(name) = name {
            self.user.name = name;
        }
        if let Some(job_rank) = job_rank {
            self.user.job_rank = job_rank;
        }
        if let Some(position) = position {
            self.user.position = position;
        }
        if let Some(email) = email {
            self.user.email = email;
        }
        if let Some(active) = active {
            self.user.active = active;
        }
        if let Some(ip_address) = ip_address {
            self.ip_address = ip_address;
        }
        if let Some(join_date) = join_date {
            self.join_date = join_date;
        }
    }
}

/// Partial update of a [`Detail`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Changes {
    /// New [`Name`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,

    /// New [`JobRank`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_rank: Option<JobRank>,

    /// New [`Position`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// New [`Email`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,

    /// New [`IpAddress`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<IpAddress>,

    /// New activity flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// New [`JoinDate`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<JoinDate>,
}

/// ID of a [`User`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Id(String);

/// Sequence number of a [`User`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
#[serde(transparent)]
pub struct SeqNo(String);

/// Defines a text field newtype which must not be blank.
macro_rules! define_non_blank {
    ($(#[doc = $doc:literal] $name:ident),* $(,)?) => {$(
        #[doc = $doc]
        #[derive(
            AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
        )]
        #[as_ref(str)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new [`", stringify!($name), "`] if \
                             the given `value` is not blank.")]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                (!value.trim().is_empty()).then_some(Self(value))
            }
        }

        impl FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    )*};
}

define_non_blank! {
    /// Name of a [`User`].
    Name,

    /// Job rank of a [`User`] (e.g. engineer, manager).
    JobRank,

    /// Department of a [`User`].
    Position,

    /// Date when a [`User`] joined, as an ISO-8601 date or date-time.
    JoinDate,
}

impl JoinDate {
    /// Returns the date part of this [`JoinDate`], dropping the time part
    /// (if any).
    #[must_use]
    pub fn date(&self) -> &str {
        self.0.split('T').next().unwrap_or_default()
    }
}

/// Email address of a [`User`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// IPv4 address of a [`User`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct IpAddress(String);

impl IpAddress {
    /// Creates a new [`IpAddress`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a dotted-quad IPv4 address.
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`IpAddress`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(concat!(
                r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}",
                r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
            ))
            .expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for IpAddress {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `IpAddress`")
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::{Changes, Detail, Email, IpAddress, JoinDate, Name};

    fn detail() -> Detail {
        serde_json::from_value(json!({
            "id": "u1",
            "seq_no": "1",
            "name": "Kim",
            "job_rank": "Manager",
            "position": "Engineering",
            "email": "kim@example.com",
            "active": true,
            "ip_address": "10.0.0.1",
            "join_date": "2023-04-01T09:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn detail_flattens_user_fields() {
        let detail = detail();

        assert_eq!(detail.user.id.as_ref(), "u1");
        assert_eq!(detail.ip_address.as_ref(), "10.0.0.1");
        assert_eq!(
            serde_json::to_value(&detail).unwrap()["email"],
            json!("kim@example.com"),
        );
    }

    #[test]
    fn applies_only_present_changes() {
        let mut detail = detail();
        detail.apply(Changes {
            name: Name::new("Lee"),
            active: Some(false),
            ..Changes::default()
        });

        assert_eq!(detail.user.name.as_ref(), "Lee");
        assert!(!detail.user.active);
        assert_eq!(detail.user.email.as_ref(), "kim@example.com");
        assert_eq!(detail.join_date.as_ref(), "2023-04-01T09:00:00Z");
    }

    #[test]
    fn changes_omit_absent_fields() {
        let changes = Changes {
            email: Email::new("lee@example.com"),
            ..Changes::default()
        };

        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!({ "email": "lee@example.com" }),
        );
    }

    #[test]
    fn validates_fields() {
        assert!(Name::new("  ").is_none());
        assert!(Name::new("Kim").is_some());

        assert!(Email::new("kim@example.com").is_some());
        assert!(Email::new("kim@example").is_none());
        assert!(Email::new("kim @example.com").is_none());

        assert!(IpAddress::new("192.168.0.255").is_some());
        assert!(IpAddress::new("256.1.1.1").is_none());
        assert!(IpAddress::new("1.2.3").is_none());
    }

    #[test]
    fn join_date_ignores_time_part() {
        let date: JoinDate = "2023-04-01T09:00:00Z".parse().unwrap();
        assert_eq!(date.date(), "2023-04-01");

        let date: JoinDate = "2023-04-01".parse().unwrap();
        assert_eq!(date.date(), "2023-04-01");
    }
}
