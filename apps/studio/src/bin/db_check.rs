//! Connectivity check: `DATABASE_URL` → connect → `SELECT 1`.
//! Exits 0 when the database answers, 1 otherwise.

#[path = "../db.rs"]
mod db;

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // load .env if present; ignore if missing

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => {
            info!("Database check passed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Database check failed: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run() -> Result<()> {
    let url = std::env::var("DATABASE_URL")
        .context("Required environment variable 'DATABASE_URL' is not set")?;
    info!("Checking {}", db::mask_database_url(&url));

    let pool = db::create_pool(&url).await?;
    db::ping(&pool).await?;
    pool.close().await;
    Ok(())
}
