mod builder;
mod config;
mod errors;
mod extract;
mod export;
mod layout;
mod models;
mod pickers;
mod preview;
mod render;
mod routes;
mod state;
mod style;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Studio v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Title gate: pause {:?}, complete {:?}, loading {:?}",
        config.title_gate.typing_pause,
        config.title_gate.complete_display,
        config.title_gate.loading_delay
    );
    info!("Profile image limit: {} bytes", config.max_image_bytes);
    info!("Idle builder sessions expire after {:?}", config.session_ttl);

    // Build app state (in-memory sessions, lopdf exporter)
    let state = AppState::new(config.clone());

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
