//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Documentation page every non-health request is forwarded to.
pub const DEFAULT_DOCS_URL: &str = "https://docs.influxdata.com/influxdb/v1.2/concepts/glossary";

/// Status feed consulted by the health endpoint.
pub const DEFAULT_STATUS_FEED_URL: &str = "http://status.aws.amazon.com/rss/s3-us-standard.rss";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Upstream resources (docs page, status feed).
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// TLS certificate and key. The gateway only serves over TLS.
    pub tls: TlsConfig,

    /// How long in-flight requests may drain after a shutdown signal.
    pub shutdown_grace_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: TlsConfig::default(),
            shutdown_grace_secs: 10,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM). May be the same file as the certificate.
    pub key_path: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: "testing.pem".to_string(),
            key_path: "testing.pem".to_string(),
        }
    }
}

/// Upstream resources the gateway talks to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the proxied documentation resource.
    pub docs_url: String,

    /// RSS status feed used to derive the health signal.
    pub status_feed_url: String,

    /// Connection establishment timeout in seconds. Unset waits indefinitely.
    pub connect_timeout_secs: Option<u64>,

    /// Total request timeout in seconds. Unset waits indefinitely.
    pub request_timeout_secs: Option<u64>,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            docs_url: DEFAULT_DOCS_URL.to_string(),
            status_feed_url: DEFAULT_STATUS_FEED_URL.to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            use_system_proxy: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.listener.tls.cert_path, "testing.pem");
        assert_eq!(config.upstream.docs_url, DEFAULT_DOCS_URL);
        assert_eq!(config.upstream.status_feed_url, DEFAULT_STATUS_FEED_URL);
        assert!(config.upstream.request_timeout_secs.is_none());
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [upstream]
            docs_url = "http://127.0.0.1:9000/docs"
            request_timeout_secs = 3

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.docs_url, "http://127.0.0.1:9000/docs");
        assert_eq!(config.upstream.status_feed_url, DEFAULT_STATUS_FEED_URL);
        assert_eq!(config.upstream.request_timeout_secs, Some(3));
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }
}
