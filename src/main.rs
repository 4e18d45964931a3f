//! selfhost-hub server entry point.
//!
//! Loads configuration, opens the store, seeds development data and
//! serves the REST API until Ctrl-C.

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use selfhost_hub::api;
use selfhost_hub::app_state::AppState;
use selfhost_hub::config::{HubConfig, LogFormat};
use selfhost_hub::persistence;
use selfhost_hub::service::HubService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = HubConfig::from_env()?;
    init_tracing(config.log_format);

    tracing::info!(addr = %config.listen_addr, "starting selfhost-hub");

    let store = persistence::open_store(&config).await?;

    let hub_service = HubService::new(store, config.latest_guides_max);
    if config.seed_on_startup {
        hub_service.seed().await?;
    }

    let app = api::app(
        AppState { hub_service },
        Duration::from_secs(config.request_timeout_secs),
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
