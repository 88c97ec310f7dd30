//! Router assembly, listener startup and the session sweeper.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::api;
use crate::orchestrator::BartenderService;

/// Build the full axum router. CORS is open on every route.
pub fn build_router(service: Arc<BartenderService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/start", get(api::start))
        .route("/api/toggle-speech", post(api::toggle_speech))
        .route("/api/question", get(api::question))
        .route("/api/answer", post(api::answer))
        .route("/api/reset", post(api::reset))
        .route("/api/close", post(api::close))
        .route("/health", get(api::health))
        .layer(cors)
        .with_state(service)
}

/// Bind `bind_addr` and serve `router` in the background.
///
/// Returns the bound address (useful with port 0) and the server task.
pub async fn start_server(
    router: Router,
    bind_addr: SocketAddr,
) -> std::io::Result<(SocketAddr, JoinHandle<std::io::Result<()>>)> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;
    info!("Listening on http://{}", addr);

    let handle = tokio::spawn(async move { axum::serve(listener, router).await });
    Ok((addr, handle))
}

/// Periodically drop sessions idle for longer than `ttl`.
pub fn spawn_session_sweeper(
    service: Arc<BartenderService>,
    ttl: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let purged = service.purge_expired(ttl);
            debug!(purged, "Session sweep finished");
        }
    })
}
