//! Document storage layer.
//!
//! [`DocumentStore`] is the collection-scoped insert/find contract used by
//! the route handlers. The only implementation is [`sqlite::SqliteStore`],
//! which keeps each document as a JSON row; swapping in another backend
//! means implementing the trait and changing the concrete type held by
//! [`crate::state::AppState`].
//!
//! The store does not know about datetimes. Callers convert timestamps to
//! ISO-8601 text before inserting and parse them back after finding.

pub mod sqlite;

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Hard cap on the number of documents a single [`DocumentStore::find`] returns.
pub const MAX_BATCH_SIZE: i64 = 1000;

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, pool or query failure reported by the driver.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded migrations could not be applied.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A document could not be encoded to, or decoded from, JSON.
    #[error("document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The document did not serialize to an object with a string `id`.
    #[error("document has no string `id` field")]
    MissingId,

    /// A document with the same `id` already exists in the collection.
    #[error("duplicate document id '{id}' in collection '{collection}'")]
    DuplicateId { collection: String, id: String },

    /// A stored timestamp is not valid RFC 3339 text.
    #[error("invalid stored timestamp '{raw}': {source}")]
    InvalidTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Conjunction of exact-match tests on top-level string fields.
///
/// An empty filter matches every document in the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<(String, String)>,
}

impl Filter {
    /// A filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    pub fn clauses(&self) -> impl Iterator<Item = (&str, &str)> {
        self.clauses.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }
}

/// Collection-scoped document persistence.
///
/// Documents are appended in order and read back in that same order. The
/// internal storage key is never part of what `find` returns: projection is
/// decided by the target type `D`, so fields it does not declare are dropped.
pub trait DocumentStore: Send + Sync + 'static {
    /// Append `document` to `collection`.
    ///
    /// The document must serialize to a JSON object with a string `id`,
    /// which has to be unique within the collection.
    fn insert<D>(
        &self,
        collection: &str,
        document: &D,
    ) -> impl Future<Output = Result<(), StoreError>> + Send
    where
        D: Serialize + Sync;

    /// Return up to [`MAX_BATCH_SIZE`] documents of `collection` matching
    /// `filter`, in insertion order.
    fn find<D>(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> impl Future<Output = Result<Vec<D>, StoreError>> + Send
    where
        D: DeserializeOwned + Send;
}
