//! # praxis-app
//!
//! The praxis server binary: resolves settings, opens the database, and
//! serves the HTTP API until ctrl-c.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use praxis_reviews::SqliteReviewStore;
use praxis_server::{AppState, ShutdownCoordinator, build_router};
use praxis_settings::Settings;
use praxis_store::ConnectionConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Personal work-session and task-board server.
#[derive(Parser, Debug)]
#[command(name = "praxis", about = "praxis API server")]
struct Cli {
    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the SQLite database file (overrides settings).
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Path to the JSON settings file (defaults to ~/.praxis/settings.json).
    #[arg(long)]
    settings_path: Option<PathBuf>,
}

/// Settings file, then `PRAXIS_*` environment, then CLI flags.
fn resolve_settings(cli: &Cli) -> Settings {
    let path = cli
        .settings_path
        .clone()
        .unwrap_or_else(praxis_settings::settings_path);
    let mut settings = praxis_settings::load(&path);
    praxis_settings::apply_env_overrides(&mut settings);
    apply_cli_overrides(&mut settings, cli);
    settings
}

fn apply_cli_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(host) = &cli.host {
        settings.host = host.clone();
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if let Some(db_path) = &cli.db_path {
        settings.db_path = db_path.display().to_string();
    }
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn ensure_parent_dir(path: &str) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let settings = resolve_settings(&args);
    init_tracing(&settings.log_level);

    if settings.uses_dev_secret() {
        tracing::warn!(
            "token secret is the development default; set PRAXIS_TOKEN_SECRET before exposing this server"
        );
    }

    ensure_parent_dir(&settings.db_path)?;
    let pool = praxis_store::pool::new_file(&settings.db_path, &ConnectionConfig::default())
        .context("Failed to open database")?;
    {
        let conn = pool.get().context("Failed to get DB connection")?;
        let version = praxis_store::run_migrations(&conn).context("Failed to run migrations")?;
        tracing::info!(version, db_path = %settings.db_path, "database ready");
    }

    let reviews = Arc::new(SqliteReviewStore::new(pool.clone()));
    let state = AppState::new(settings.clone(), pool, reviews);
    let router = build_router(state);

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local_addr = listener.local_addr()?;
    tracing::info!("praxis listening on http://{local_addr}");

    let shutdown = ShutdownCoordinator::new();
    let token = shutdown.token();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::warn!("ctrl-c handler failed to install");
            return;
        }
        tracing::info!("shutdown signal received");
        shutdown.shutdown();
    });

    axum::serve(listener, router)
        .with_graceful_shutdown(token.cancelled_owned())
        .await
        .context("Server error")?;

    ctrl_c.abort();
    tracing::info!("shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_leave_settings_untouched() {
        let cli = Cli::parse_from(["praxis"]);
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(cli.settings_path.is_none());

        let mut settings = Settings::default();
        apply_cli_overrides(&mut settings, &cli);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn cli_flags_override_settings() {
        let cli = Cli::parse_from([
            "praxis",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--db-path",
            "/tmp/praxis-test.db",
        ]);
        let mut settings = Settings::default();
        apply_cli_overrides(&mut settings, &cli);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.db_path, "/tmp/praxis-test.db");
    }

    #[test]
    fn ensure_parent_dir_handles_bare_filename() {
        assert!(ensure_parent_dir("praxis.db").is_ok());
    }
}
