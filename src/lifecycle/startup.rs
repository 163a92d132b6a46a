//! Startup orchestration.
//!
//! Subsystems come up in dependency order: metrics, TLS material, server
//! state, shutdown wiring, and finally the listener.

use std::net::SocketAddr;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::http::GatewayServer;
use crate::lifecycle::Shutdown;
use crate::net::load_tls_config;
use crate::observability::metrics;

/// Run the gateway until a shutdown signal has been handled.
pub async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        docs_url = %config.upstream.docs_url,
        status_feed_url = %config.upstream.status_feed_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let tls = load_tls_config(&config.listener.tls).await?;
    let shutdown = Shutdown::new(Duration::from_secs(config.listener.shutdown_grace_secs));
    let handle = shutdown.handle();

    let server = GatewayServer::new(config)?;
    let signals = shutdown.trigger_on_signal();

    server.run(tls, handle).await?;
    signals.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}
