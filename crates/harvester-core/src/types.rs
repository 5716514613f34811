//! Domain types shared across the harvester.

use serde::{Deserialize, Serialize};

/// One row of a listing page.
///
/// Exists only while its page is being dispatched; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Name shown on the listing row
    pub display_name: String,
    /// Absolute URL of the detail page, if the row links to one
    pub detail_url: Option<String>,
}

impl ListingEntry {
    /// Create a listing entry.
    #[must_use]
    pub fn new(display_name: impl Into<String>, detail_url: Option<String>) -> Self {
        Self {
            display_name: display_name.into(),
            detail_url,
        }
    }
}

/// The structured result of visiting one profile page.
///
/// `ordinal` is the entry's position within its dispatch batch. It is unique
/// only inside that batch and is used as a sort key, never as an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    /// Position within the dispatch batch
    pub ordinal: usize,
    /// Full name as shown on the listing row
    pub full_name: String,
    /// First whitespace-delimited token of `full_name`
    pub first_name: String,
    /// Email address, empty if not found
    pub email: String,
    /// Country, empty if not found
    pub country: String,
}

impl DetailRecord {
    /// Create a record, deriving the first name from `full_name`.
    #[must_use]
    pub fn new(
        ordinal: usize,
        full_name: impl Into<String>,
        email: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        let full_name = full_name.into();
        Self {
            ordinal,
            first_name: derive_first_name(&full_name),
            full_name,
            email: email.into(),
            country: country.into(),
        }
    }
}

/// First whitespace-delimited token of `full_name`, or empty.
#[must_use]
pub fn derive_first_name(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// One persisted row of the durable store.
///
/// Field order and header names define the store schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreRow {
    /// Full name
    #[serde(rename = "Full Name")]
    pub full_name: String,
    /// First name
    #[serde(rename = "First Name")]
    pub first_name: String,
    /// Email address
    #[serde(rename = "Email")]
    pub email: String,
    /// Country
    #[serde(rename = "Country")]
    pub country: String,
}

impl StoreRow {
    /// Store header, in column order.
    pub const HEADER: [&'static str; 4] = ["Full Name", "First Name", "Email", "Country"];

    /// Create a row from its four fields.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            first_name: first_name.into(),
            email: email.into(),
            country: country.into(),
        }
    }
}

impl From<DetailRecord> for StoreRow {
    fn from(record: DetailRecord) -> Self {
        Self {
            full_name: record.full_name,
            first_name: record.first_name,
            email: record.email,
            country: record.country,
        }
    }
}
