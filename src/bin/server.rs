//! Student server: reads config from env, opens the configured store, mounts student and common routes.

use student_registry::{app, open_store, AppError, AppState, ServerConfig, StudentService};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_registry=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().map_err(AppError::from)?;
    let store = open_store(&config).await?;
    let state = AppState::new(StudentService::new(store));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(store = %config.store, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, config.body_limit))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
