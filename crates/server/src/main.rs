//! `bartender-server`: serves the questionnaire API.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{BartenderService, ServerConfig, build_router, spawn_session_sweeper, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,server=debug,recommender=debug,questionnaire=debug")
            }),
        )
        .init();

    let config = ServerConfig::parse();
    info!("Starting bartender server");

    let service = Arc::new(BartenderService::from_config(&config)?);
    let _sweeper = spawn_session_sweeper(
        Arc::clone(&service),
        config.session_ttl(),
        config.sweep_interval(),
    );

    let router = build_router(service);
    let (addr, server) = start_server(router, config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Bartender ready at http://{}", addr);

    server
        .await
        .context("Server task panicked")?
        .context("Server stopped with an error")?;
    Ok(())
}
