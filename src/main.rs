use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use formsync::config::Config;
use formsync::sync::{self, AppsScriptClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting formsync");

    let store = formsync::open_store(&config.data_dir).await?;
    tracing::info!("Data directory: {}", store.dir().display());

    let target = AppsScriptClient::new(&config.sync, config.sync_timeout)?;
    if config.sync.is_enabled() {
        tracing::info!("Apps Script sync enabled");
    } else {
        tracing::warn!("Apps Script sync not configured; submissions are stored locally only");
    }

    let (queue, jobs) = sync::channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = formsync::worker::spawn(Arc::new(target), jobs, shutdown_rx);

    let addr = SocketAddr::new(config.host, config.port);
    let (app, _) = formsync::build_app(config, Arc::new(store), queue);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = worker.await {
        tracing::error!("Sync worker ended abnormally: {e}");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
