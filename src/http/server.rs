//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the upstream client and the handlers' state from config
//! - Create the Axum Router (health subtree, proxy fallback)
//! - Wrap it in the interceptor pipeline and request tracing
//! - Serve it over TLS until shut down

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::any,
    Router,
};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use tower_http::trace::TraceLayer;
use url::Url;

use crate::config::GatewayConfig;
use crate::error::StartupError;
use crate::health::{health_handler, StatusFeedProbe};
use crate::http::client::build_client;
use crate::http::middleware::{intercept, Pipeline};
use crate::proxy::{proxy_handler, DocsProxy};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<DocsProxy>,
    pub probe: Arc<StatusFeedProbe>,
}

impl FromRef<AppState> for Arc<DocsProxy> {
    fn from_ref(state: &AppState) -> Self {
        state.proxy.clone()
    }
}

impl FromRef<AppState> for Arc<StatusFeedProbe> {
    fn from_ref(state: &AppState) -> Self {
        state.probe.clone()
    }
}

impl AppState {
    /// Build handler state from the upstream section of the config.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, StartupError> {
        let client = build_client(&config.upstream)?;
        let docs_url = parse_url("upstream.docs_url", &config.upstream.docs_url)?;
        let feed_url = parse_url(
            "upstream.status_feed_url",
            &config.upstream.status_feed_url,
        )?;

        Ok(Self {
            proxy: Arc::new(DocsProxy::new(client.clone(), docs_url)),
            probe: Arc::new(StatusFeedProbe::new(client, feed_url)),
        })
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, StartupError> {
    Url::parse(value).map_err(|source| StartupError::Url { field, source })
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, StartupError> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(state, Pipeline::standard());
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState, pipeline: Pipeline) -> Router {
        Router::new()
            .route("/health", any(redirect_to_health))
            .route("/health/", any(health_handler))
            .route("/health/{*rest}", any(health_handler))
            .fallback(proxy_handler)
            .with_state(state)
            .layer(middleware::from_fn_with_state(Arc::new(pipeline), intercept))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for serving or driving directly.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Serve over TLS until `handle` is told to shut down.
    pub async fn run(self, tls: RustlsConfig, handle: Handle) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.listener.bind_address.parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                StartupError::BindAddress(self.config.listener.bind_address.clone()),
            )
        })?;

        tracing::info!(address = %addr, "HTTPS server starting");

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// `/health` without the trailing slash answers with a redirect.
async fn redirect_to_health() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "/health/")],
    )
}
