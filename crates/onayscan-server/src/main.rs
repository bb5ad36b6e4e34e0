//! OnayScan — procurement-approval document analysis server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;
mod worker;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("ONAYSCAN_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = onayscan_core::OnayscanConfig::from_env(&data_dir)?;
    let port = config.port;

    let state = Arc::new(AppState::new(config));

    // Start background analysis queue
    worker::start_analysis_worker(state.clone());

    let app = routes::build_router(state.clone());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("OnayScan server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
