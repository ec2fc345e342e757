use std::sync::Arc;

use anyhow::Context;
use org_chart_engine::api::{AppState, create_router};
use org_chart_engine::config::ConfigLoader;
use org_chart_engine::ids::UuidGenerator;
use org_chart_engine::store::{InMemoryCompensationStore, InMemoryEmployeeStore, load_seed_file};
use org_chart_engine::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loader = ConfigLoader::from_env().context("failed to load configuration")?;
    let config = loader.config();

    telemetry::init(&config.logging);

    let seed = match &config.seed.employees {
        Some(path) => {
            let employees = load_seed_file(path)
                .with_context(|| format!("failed to load seed data from {}", path.display()))?;
            info!(path = %path.display(), employees = employees.len(), "Loaded seed data");
            employees
        }
        None => Vec::new(),
    };

    let state = AppState::new(
        Arc::new(InMemoryEmployeeStore::with_records(seed)),
        Arc::new(InMemoryCompensationStore::new()),
        Arc::new(UuidGenerator),
        config,
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;

    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
