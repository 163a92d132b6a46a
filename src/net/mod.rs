//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! PEM certificate + key on disk
//!     → tls.rs (existence check, rustls config)
//!     → axum-server TLS acceptor (http::server)
//! ```
//!
//! # Design Decisions
//! - TLS is mandatory; there is no plaintext listener
//! - Certificate problems are startup errors, never request errors

pub mod tls;

pub use tls::load_tls_config;
