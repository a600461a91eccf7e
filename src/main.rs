use std::env;
use std::sync::Arc;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, DatasetLoader};
use payroll_engine::engine::PayrollEngine;
use payroll_engine::logging;
use tokio::net::TcpListener;
use tracing::{error, info};

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
    }
}

async fn run() -> Result<(), String> {
    let config_path =
        env::var("PAYROLL_CONFIG").unwrap_or_else(|_| "./config/engine.yaml".to_string());
    let dataset_dir =
        env::var("PAYROLL_DATASET").unwrap_or_else(|_| "./config/dataset".to_string());

    let settings = ConfigLoader::load_settings(&config_path).map_err(|e| e.to_string())?;
    let store = DatasetLoader::load(&dataset_dir).map_err(|e| e.to_string())?;
    info!(
        config = %config_path,
        dataset = %dataset_dir,
        employees = store.employee_count(),
        "Payroll data loaded"
    );

    let bind_address = settings.server.bind_address.clone();
    let engine = PayrollEngine::new(Arc::new(store), settings).map_err(|e| e.to_string())?;
    let app = create_router(AppState::new(engine));

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|e| format!("bind {bind_address} failed: {e}"))?;
    info!("payroll-engine listening on {bind_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(message) = run().await {
        error!("{message}");
        std::process::exit(1);
    }
}
