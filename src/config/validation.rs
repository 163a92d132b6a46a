//! Configuration validation.
//!
//! Serde handles the syntax; this checks what serde cannot: addresses parse,
//! upstream URLs are absolute http(s) URLs, TLS paths are present.
//! Every problem is reported, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL {value:?}: {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: unsupported URL scheme {scheme:?} (expected http or https)")]
    UnsupportedScheme { field: &'static str, scheme: String },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    if config.listener.tls.cert_path.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "listener.tls.cert_path",
        });
    }
    if config.listener.tls.key_path.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "listener.tls.key_path",
        });
    }

    check_upstream_url("upstream.docs_url", &config.upstream.docs_url, &mut errors);
    check_upstream_url(
        "upstream.status_feed_url",
        &config.upstream.status_feed_url,
        &mut errors,
    );
    if config.upstream.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::Zero {
            field: "upstream.connect_timeout_secs",
        });
    }
    if config.upstream.request_timeout_secs == Some(0) {
        errors.push(ValidationError::Zero {
            field: "upstream.request_timeout_secs",
        });
    }

    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_upstream_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::UnsupportedScheme {
            field,
            scheme: url.scheme().to_string(),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}
