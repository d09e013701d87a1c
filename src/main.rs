use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use weather_bites::WeatherBitesConfig;
use weather_bites::api::AppState;
use weather_bites::store::PersistentStore;
use weather_bites::weather::WeatherClient;
use weather_bites::web;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weather_bites={level},info")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeatherBitesConfig::load()?;
    init_tracing(&config.logging.level);

    let store = PersistentStore::open(&config.store.path)
        .with_context(|| format!("Failed to open record store at {}", config.store.path))?;
    let weather = WeatherClient::new(&config.weather);

    let state = Arc::new(AppState {
        store,
        weather,
        max_results: config.recommendation.max_results,
    });

    web::run(state, config.server.port).await
}
