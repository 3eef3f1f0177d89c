//! Atrium Carrier Proxy binary.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use atrium_server::{
    AddressUpstream, AppState, CarrierTokenCache, Clock, GrantExchanger, HttpAddressUpstream,
    HttpGrantExchanger, ServerConfig, SystemClock,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let http = reqwest::Client::new();
    let exchanger =
        Arc::new(HttpGrantExchanger::new(http.clone(), &config)) as Arc<dyn GrantExchanger>;
    let upstream = Arc::new(HttpAddressUpstream::new(http, &config)) as Arc<dyn AddressUpstream>;
    let cache = Arc::new(CarrierTokenCache::new(
        exchanger,
        Arc::new(SystemClock::new()) as Arc<dyn Clock>,
    ));

    tracing::info!(
        "Starting Atrium Carrier Proxy v{}",
        env!("CARGO_PKG_VERSION")
    );

    atrium_server::run_server(addr, AppState { cache, upstream }).await?;

    Ok(())
}
