use anyhow::Context;
use clap::Parser;
use linkbox_gateway::cli::CLI;
use linkbox_gateway::{telemetry, App, AppState};
use linkbox_generator::RandomGenerator;
use linkbox_shortener::{ShortLinkStore, Shortener, StoreSettings};
use linkbox_storage::JsonFilePersister;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    telemetry::init(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        data_file = %config.data_file.display(),
        public_base_url = %config.public_base_url,
        "starting linkbox"
    );

    let persister = JsonFilePersister::open(&config.data_file)
        .await
        .with_context(|| format!("failed to prepare {}", config.data_file.display()))?;
    info!(path = %persister.path().display(), "using backing file");
    let settings = StoreSettings::builder()
        .public_base_url(config.public_base_url.as_str())
        .recover_corrupt(config.recover_corrupt)
        .build();
    let store = Arc::new(
        ShortLinkStore::open(persister, RandomGenerator::new(), settings)
            .await
            .context("failed to open link store")?,
    );

    let mut state = AppState::new(store.clone());
    if let Some(path) = &config.fallback_page {
        let html = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read fallback page {}", path.display()))?;
        state = state.with_fallback_page(html);
    }

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.flush().await.context("failed to flush link store")?;
    info!("shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
