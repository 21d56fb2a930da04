use std::sync::Arc;

use tracing::info;

use marketdash::api::{router, AppState};
use marketdash::config::Config;
use marketdash::source::AlphaVantageSource;
use marketdash::store::memory::MemoryStore;
use marketdash::store::seed;
use marketdash::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env
    telemetry::init_tracing("marketdash=info,tower_http=info");

    let config = Config::from_env()?;
    if config.demo_mode() {
        info!("no ALPHA_VANTAGE_API_KEY set, aggregate quote runs in demo mode");
    }

    let store = Arc::new(MemoryStore::new());
    seed::seed(store.as_ref()).await?;

    let source = Arc::new(AlphaVantageSource::new(config.alpha_vantage_api_key.clone()));
    let app = router(AppState::new(store, source));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "market dashboard API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
