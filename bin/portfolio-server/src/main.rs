//! portfolio-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables.
//! 2. Initialise structured tracing (JSON in production, pretty in dev).
//! 3. Open the document store and run pending migrations.
//! 4. Set up the notification sender, if configured.
//! 5. Build the Axum router and start the HTTP server with graceful shutdown.
//! 6. Close the document store.

mod config;
mod db;
mod entities;
mod error;
mod middleware;
mod notify;
mod routes;
mod schemas;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::db::sqlite::SqliteStore;
use crate::notify::Notifier;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cfg = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    // Build the log-level filter, warning loudly if the configured value is
    // not a valid tracing filter expression.
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: PORTFOLIO_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(version = env!("CARGO_PKG_VERSION"), "portfolio-server starting");

    // ── 3. Document store ──────────────────────────────────────────────────────
    let store = SqliteStore::connect(
        &cfg.database_url,
        cfg.database_name.clone(),
        cfg.database_max_connections,
    )
    .await?;
    info!(
        database_url = %cfg.database_url,
        database = %store.database(),
        "document store ready"
    );

    // ── 4. Notifications ───────────────────────────────────────────────────────
    let notifier = Notifier::from_config(&cfg)?;
    match &notifier {
        Some(_) => info!(recipient = ?cfg.notification_email, "email notifications enabled"),
        None => warn!("PORTFOLIO_RESEND_API_KEY or PORTFOLIO_NOTIFICATION_EMAIL unset; email notifications disabled"),
    }

    // ── 5. HTTP server with graceful shutdown ──────────────────────────────────
    let store = Arc::new(store);
    let state = Arc::new(AppState {
        config: Arc::new(cfg.clone()),
        store: Arc::clone(&store),
        notifier,
    });

    let app = routes::build(state);
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // ── 6. Teardown ────────────────────────────────────────────────────────────
    store.close().await;
    info!("portfolio-server stopped");
    Ok(())
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => { s.recv().await; }
            Err(e)    => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c   => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
