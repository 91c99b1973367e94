//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for portfolio-server.
///
/// Storage settings always have a default. The notification settings are
/// optional: leaving out the API key or the recipient turns notification
/// emails off without failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8001"`).
    pub bind_address: String,

    /// Text returned by the API root endpoint.
    pub api_message: String,

    /// sqlx SQLite connection string (default: `"sqlite://portfolio.db"`).
    pub database_url: String,

    /// Logical database name; every collection is scoped under it.
    pub database_name: String,

    /// Upper bound on pooled storage connections.
    pub database_max_connections: u32,

    /// Resend API key. `None` disables notification emails.
    pub resend_api_key: Option<String>,

    /// Base URL of the Resend HTTP API.
    pub resend_api_url: String,

    /// `From:` address of notification emails.
    pub sender_email: String,

    /// Recipient of notification emails. `None` disables them.
    pub notification_email: Option<String>,

    /// Comma-separated CORS allow-list; `None` or `*` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Serve the generated OpenAPI document at `/api-docs/openapi.json`.
    pub enable_api_docs: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_owned());
        let flag = |key: &str, default: bool| {
            get(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        Self {
            bind_address: or("PORTFOLIO_BIND", "0.0.0.0:8001"),
            api_message: or("PORTFOLIO_API_MESSAGE", "Aaditya Tiwari Portfolio API"),
            database_url: or("PORTFOLIO_DATABASE_URL", "sqlite://portfolio.db"),
            database_name: or("PORTFOLIO_DB_NAME", "portfolio"),
            database_max_connections: get("PORTFOLIO_DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            resend_api_key: get("PORTFOLIO_RESEND_API_KEY"),
            resend_api_url: or("PORTFOLIO_RESEND_API_URL", "https://api.resend.com"),
            sender_email: or("PORTFOLIO_SENDER_EMAIL", "onboarding@resend.dev"),
            notification_email: get("PORTFOLIO_NOTIFICATION_EMAIL"),
            cors_allowed_origins: get("PORTFOLIO_CORS_ORIGINS"),
            log_level: or("PORTFOLIO_LOG", "info"),
            log_json: flag("PORTFOLIO_LOG_JSON", false),
            enable_api_docs: flag("PORTFOLIO_ENABLE_API_DOCS", true),
        }
    }
}
