//! Atrium Carrier Proxy
//!
//! A small backend that exchanges client credentials for a carrier API
//! token, caches it until expiry, and forwards address-validation
//! requests to the carrier with that token attached. It shares no state
//! with the dashboard's client-side auth subsystem; the two are separate
//! trust domains.

pub mod carrier;
pub mod clock;
pub mod config;
pub mod error;
pub mod routes;
pub mod token_cache;

use std::net::SocketAddr;

pub use carrier::{AddressUpstream, GrantExchanger, HttpAddressUpstream, HttpGrantExchanger, UpstreamReply};
pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, ServerConfig};
pub use error::ProxyError;
pub use routes::{AppState, router};
pub use token_cache::CarrierTokenCache;

/// Binds the listener and serves the proxy until shutdown.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "carrier proxy listening");
    axum::serve(listener, router(state)).await
}
