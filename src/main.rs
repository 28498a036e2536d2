use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use sitterbook::config::{AppConfig, StoreBackend};
use sitterbook::routes;
use sitterbook::state::AppState;
use sitterbook::store::airtable::AirtableClient;
use sitterbook::store::memory::MemoryStore;
use sitterbook::store::RecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store: Box<dyn RecordStore> = match config.store_backend {
        StoreBackend::Airtable => {
            anyhow::ensure!(
                !config.airtable_api_key.is_empty(),
                "AIRTABLE_API_KEY must be set when STORE_BACKEND=airtable"
            );
            anyhow::ensure!(
                !config.airtable_base_id.is_empty(),
                "AIRTABLE_BASE_ID must be set when STORE_BACKEND=airtable"
            );
            tracing::info!(base = %config.airtable_base_id, "using Airtable record store");
            Box::new(AirtableClient::new(
                &config.airtable_api_url,
                config.airtable_base_id.clone(),
                config.airtable_api_key.clone(),
            )?)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory record store, data is lost on restart");
            Box::new(MemoryStore::new())
        }
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
    });

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
