//! Journal server: loads config from the environment, prepares the database, serves HTTP.
//!
//! Run from repo root: `cargo run -p journal-server`

use learning_journal::config::debug_from_env;
use learning_journal::{
    app, apply_migrations, connect_pool, ensure_database_exists, AppState, JournalConfig,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let default_filter = if debug_from_env() {
        "learning_journal=debug,tower_http=debug"
    } else {
        "learning_journal=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = JournalConfig::from_env()?;
    tracing::info!(
        port = config.port,
        debug = config.debug,
        admin = %config.auth.username,
        "starting learning journal"
    );

    ensure_database_exists(&config.database.url).await?;
    let pool = connect_pool(&config.database).await?;
    apply_migrations(&pool).await?;

    let port = config.port;
    let state = AppState::new(pool, config)?;
    let router = app(state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
