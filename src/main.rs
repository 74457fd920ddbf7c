use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker_server::{
    app, config::Config, constants::DEFAULT_LOG_FILTER, database, service::ExpenseService,
    store::LibsqlStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // load environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = database::init_db(&config.data_path)
        .await
        .with_context(|| format!("Failed to initialize DB in {}", config.data_path))?;
    tracing::info!(data_path = %config.data_path, "connected to expense database");

    let service = ExpenseService::new(Arc::new(LibsqlStore::new(db)));

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Server running on http://{}", bind_address);

    axum::serve(listener, app(service)).await?;
    Ok(())
}
