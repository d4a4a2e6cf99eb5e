mod cache;
mod config;
mod error;
mod keywords;
mod model;
mod normalize;
mod search;
mod server;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aroma_common::ai::{AiClientConfig, SuggestionClient};
use aroma_common::catalog::{CatalogClient, CatalogClientConfig};
use aroma_common::redis::RedisCache;

use cache::ResponseCache;
use config::Config;
use keywords::SymptomKeywords;
use search::SearchEngine;
use server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("starting aroma-api");

    // 1. Load config from environment
    let config = Config::from_env();
    let catalog_config = CatalogClientConfig::from_env()?;
    let ai_config = AiClientConfig::from_env();
    info!(
        listen_addr = %config.listen_addr,
        catalog = %catalog_config.base_url,
        ai_model = %ai_config.model,
        redis = config.redis_url.is_some(),
        "configuration loaded"
    );

    // 2. Connect to Redis (optional — graceful degradation if unavailable)
    let redis_cache = RedisCache::new(config.redis_url.as_deref());
    if redis_cache.is_available().await {
        info!("redis connected");
    } else {
        info!("redis unavailable, running without cache");
    }
    let cache = ResponseCache::new(redis_cache);

    // 3. Build the upstream clients
    let catalog = CatalogClient::new(catalog_config)?;
    let ai = SuggestionClient::new(ai_config)?;

    // 4. Build the search engine with the default symptom table
    let keywords = SymptomKeywords::brazilian_portuguese();
    info!(symptoms = keywords.len(), "symptom keyword table loaded");
    let engine = SearchEngine::new(keywords);

    let state = Arc::new(AppState {
        engine,
        catalog,
        cache,
        ai,
    });
    let app = server::router(state);

    // 5. Serve
    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "HTTP server ready");
    axum::serve(listener, app).await?;

    info!("HTTP server shut down");
    Ok(())
}
