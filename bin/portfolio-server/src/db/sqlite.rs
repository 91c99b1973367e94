//! SQLite implementation of [`DocumentStore`].
//!
//! Uses [`sqlx`] with the `sqlite` feature. Migrations are embedded at
//! compile time from `./migrations` (relative to `CARGO_MANIFEST_DIR`) and
//! applied on [`SqliteStore::connect`].
//!
//! Every document lives in the single `documents` table, tagged with the
//! logical database name and its collection. Filters are evaluated with
//! `json_extract`, and ordering uses the autoincrement `seq` column.

use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use super::{DocumentStore, Filter, MAX_BATCH_SIZE, StoreError};

/// SQLite-backed document store bound to one logical database.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
    database: String,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` is a sqlx SQLite URL such as `"sqlite://portfolio.db"`, or
    /// `"sqlite::memory:"` with `max_connections = 1` for tests.
    pub async fn connect(
        url: &str,
        database: impl Into<String>,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self {
            pool,
            database: database.into(),
        })
    }

    /// Logical database name this store reads and writes.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Close every pooled connection. Later calls fail with a storage error.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    #[cfg(test)]
    pub(crate) fn with_database(&self, database: &str) -> Self {
        Self {
            pool: self.pool.clone(),
            database: database.to_owned(),
        }
    }
}

impl DocumentStore for SqliteStore {
    async fn insert<D>(&self, collection: &str, document: &D) -> Result<(), StoreError>
    where
        D: Serialize + Sync,
    {
        let body = serde_json::to_value(document)?;
        let doc_id = body
            .get("id")
            .and_then(Value::as_str)
            .ok_or(StoreError::MissingId)?
            .to_owned();
        let encoded = body.to_string();

        let result = sqlx::query(
            "INSERT INTO documents (database, collection, doc_id, body) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&self.database)
        .bind(collection)
        .bind(&doc_id)
        .bind(&encoded)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!(collection, id = %doc_id, "document inserted");
                Ok(())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateId {
                    collection: collection.to_owned(),
                    id: doc_id,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find<D>(&self, collection: &str, filter: &Filter) -> Result<Vec<D>, StoreError>
    where
        D: DeserializeOwned + Send,
    {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT body FROM documents WHERE database = ");
        query
            .push_bind(self.database.clone())
            .push(" AND collection = ")
            .push_bind(collection.to_owned());
        for (field, value) in filter.clauses() {
            query
                .push(" AND json_extract(body, ")
                .push_bind(format!("$.{field}"))
                .push(") = ")
                .push_bind(value.to_owned());
        }
        query.push(" ORDER BY seq ASC LIMIT ").push_bind(MAX_BATCH_SIZE);

        let bodies: Vec<String> = query.build_query_scalar().fetch_all(&self.pool).await?;
        debug!(collection, count = bodies.len(), "documents fetched");

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(StoreError::from))
            .collect()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
