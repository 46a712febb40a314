//! Database bootstrap: create the target database if missing and build the connection pool.
//! Every pooled connection carries a server-side `statement_timeout` so a slow query fails instead of hanging.

use crate::config::DatabaseSettings;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Parse `settings.url` and attach the statement timeout.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions, AppError> {
    let opts = PgConnectOptions::from_str(&settings.url)
        .map_err(|e| ConfigError::Load(format!("invalid DATABASE_URL: {}", e)))?;
    let timeout_ms = settings.statement_timeout.as_millis().to_string();
    Ok(opts.options([("statement_timeout", timeout_ms)]))
}

/// Pool options shared by eager and lazy pools.
pub fn pool_options(settings: &DatabaseSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
}

/// Connect a pool now; fails if the database is unreachable.
pub async fn connect_pool(settings: &DatabaseSettings) -> Result<PgPool, AppError> {
    let opts = connect_options(settings)?;
    let pool = pool_options(settings).connect_with(opts).await?;
    Ok(pool)
}

/// Build a pool that opens connections on first use.
pub fn connect_pool_lazy(settings: &DatabaseSettings) -> Result<PgPool, AppError> {
    let opts = connect_options(settings)?;
    Ok(pool_options(settings).connect_lazy_with(opts))
}

/// Create the database named in `database_url` when it does not exist yet.
/// Connects to the `postgres` maintenance database on the same server to do so.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::Load(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::Load("DATABASE_URL: no path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let query = path_and_query
        .split_once('?')
        .map(|(_, q)| format!("?{}", q))
        .unwrap_or_default();
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
