//! Club competition booking portal.

use club_booking_portal::{
    adapters::{clock::SystemClock, http::build_router, store::json_file::JsonFileStore},
    commands::DomainLogic,
    config::Config,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.secret_key.is_none() {
        warn!("SECRET_KEY is not set");
    }

    let store = JsonFileStore::new(
        config.storage.clubs_path(),
        config.storage.competitions_path(),
    );
    info!(
        clubs = %store.clubs_path().display(),
        competitions = %store.competitions_path().display(),
        testing = config.storage.testing,
        "loading records"
    );
    let domain = DomainLogic::load(Arc::new(store), Arc::new(SystemClock)).await?;

    let app = build_router(domain);
    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
