//! [`Envelope`] wrapping every HTTP API response.

use serde::{Deserialize, Serialize};

/// Response envelope: `{ meta: { status, message }, data }`.
///
/// `data` is omitted for failures and plain acknowledgements.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Envelope<T> {
    /// [`Meta`] information of the response.
    pub meta: Meta,

    /// Payload of the response.
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Serde default of [`Envelope::data`], not requiring `T: Default`.
fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// Message of successful data responses.
    pub const SUCCESS: &'static str = "Success";

    /// Creates a new successful [`Envelope`] carrying the provided `data`.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            meta: Meta {
                status: 200,
                message: Self::SUCCESS.to_owned(),
            },
            data: Some(data),
        }
    }

    /// Creates a new successful [`Envelope`] without any data.
    #[must_use]
    pub fn ack(message: impl Into<String>) -> Self {
        Self {
            meta: Meta {
                status: 200,
                message: message.into(),
            },
            data: None,
        }
    }

    /// Creates a new failed [`Envelope`] with the provided `status` and
    /// `message`.
    #[must_use]
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            meta: Meta {
                status,
                message: message.into(),
            },
            data: None,
        }
    }
}

/// Meta information of an [`Envelope`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Meta {
    /// HTTP status code of the response.
    pub status: u16,

    /// Human-readable message.
    pub message: String,
}

/// Payload of a paginated list response.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ListPayload<T> {
    /// 1-based index of the returned page.
    pub page_index: usize,

    /// Requested page size.
    pub page_size: usize,

    /// Total count of items matching the filter.
    pub total_count: usize,

    /// Items on the returned page.
    pub result_list: Vec<T>,
}
