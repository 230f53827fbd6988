use std::sync::Arc;

use eyre::WrapErr;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use depot_api::{AccessState, AppState, RepositoryInfo, Settings, router};
use depot_store::FileStore;

const DEFAULT_FILTER: &str = "depot=info,depot_api=info,depot_store=info,tower_http=info";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?)
        .with(tracing_subscriber::fmt::layer())
        .with(ErrorLayer::default())
        .init();

    let settings = Settings::load().wrap_err("Failed to read configuration from environment")?;
    let store_config = settings.store_config();

    if store_config.access_token().is_none() {
        tracing::warn!("GITHUB_TOKEN is not set; upstream calls will be unauthenticated");
    }

    let store = FileStore::new(&store_config).wrap_err("Failed to create file store")?;
    let state = AppState::new(Arc::new(store), RepositoryInfo::from(&store_config));
    let app = router(state, AccessState::new(settings.api_secret.as_str()));

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        "Serving {}/{}@{} on {}",
        store_config.account(),
        store_config.repository(),
        store_config.branch_name(),
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
