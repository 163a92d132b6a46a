//! TLS-terminating documentation gateway library.
//!
//! Forwards requests to a fixed documentation page (keeping only the URL
//! fragment) and answers `/health/` from an upstream RSS status feed.

pub mod config;
pub mod error;
pub mod feed;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod proxy;

pub use config::GatewayConfig;
pub use error::{GatewayError, StartupError};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
