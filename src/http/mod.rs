//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TLS connection (axum-server)
//!     → TraceLayer (request span)
//!     → middleware.rs (version tag, request log)
//!     → server.rs router
//!         /health/...  → health::health_handler
//!         everything   → proxy::proxy_handler
//!     → client.rs (shared upstream client)
//! ```

pub mod client;
pub mod middleware;
pub mod server;

pub use middleware::{Interceptor, Pipeline, VERSION, X_PROXY_VERSION};
pub use server::{AppState, GatewayServer};
