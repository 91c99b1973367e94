//! Storage documents.
//!
//! These are the exact shapes written to and read from the document store.
//! Timestamps are kept as RFC 3339 text because the store has no datetime
//! type; [`parse_timestamp`] turns them back into `DateTime<Utc>`.

pub mod contact;
pub mod portfolio;

pub use contact::ContactDocument;
pub use portfolio::PortfolioDocument;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::db::StoreError;

/// Version stamped on documents written by this build.
pub const SCHEMA_VERSION: u32 = 1;

pub(crate) fn schema_version() -> u32 {
    SCHEMA_VERSION
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| StoreError::InvalidTimestamp {
            raw: raw.to_owned(),
            source,
        })
}
