use std::{net::SocketAddr, path::PathBuf};

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use service::{storage::JsonFileStore, TodoService};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, AppState};

/// Initialize logging via shared common utils
fn init_logging() {
    common::utils::logging::init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the backing file and assemble the router around it.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let todos_path = PathBuf::from(&cfg.storage.todos_path);
    common::env::ensure_data_dir(&todos_path).await?;
    let store = JsonFileStore::init(&todos_path).await?;
    info!(path = %store.path().display(), "todo storage ready");

    let state = AppState::new(TodoService::with_random_ids(store));
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::resolve();
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    info!(%addr, "starting todo server");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("todo server stopped");
    Ok(())
}
