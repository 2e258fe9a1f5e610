use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use url::Url;

/// Creates a small PostgreSQL pool for connectivity checks.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("could not connect to the database")?;

    info!("PostgreSQL connection established");
    Ok(pool)
}

/// Runs `SELECT 1` and checks the answer.
pub async fn ping(pool: &PgPool) -> Result<()> {
    let one: i32 = sqlx::query_scalar("SELECT 1")
        .fetch_one(pool)
        .await
        .context("SELECT 1 failed")?;
    anyhow::ensure!(one == 1, "SELECT 1 returned {one}");
    Ok(())
}

/// The connection string with its password replaced by `****`, for logs.
pub fn mask_database_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            if url.password().is_some() && url.set_password(Some("****")).is_err() {
                return "<unprintable database url>".to_string();
            }
            url.to_string()
        }
        Err(_) => mask_textually(raw),
    }
}

/// Fallback for strings the URL parser rejects: hide whatever sits between
/// the user name and the `@`.
fn mask_textually(raw: &str) -> String {
    let Some(at) = raw.rfind('@') else {
        return raw.to_string();
    };
    let creds_start = raw.find("://").map(|i| i + 3).unwrap_or(0);
    if creds_start > at {
        return raw.to_string();
    }
    match raw[creds_start..at].find(':') {
        Some(colon) => format!("{}:****{}", &raw[..creds_start + colon], &raw[at..]),
        None => raw.to_string(),
    }
}
