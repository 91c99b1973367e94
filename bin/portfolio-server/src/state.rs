//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::db::sqlite::SqliteStore;
use crate::notify::Notifier;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Document store holding contact submissions and portfolio items.
    pub store: Arc<SqliteStore>,
    /// Notification sender; `None` when email is not configured.
    pub notifier: Option<Notifier>,
}
