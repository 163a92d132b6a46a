//! Status-feed health evaluation.
//!
//! # Responsibilities
//! - Fetch the configured status feed on every health request
//! - Extract the latest incident title
//! - Map it to a binary health signal
//!
//! Nothing is cached: two calls a millisecond apart fetch the feed twice.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use url::Url;

use crate::error::GatewayError;
use crate::feed;
use crate::observability::metrics;

/// Marker an incident title carries once the incident is over.
pub const RESOLUTION_MARKER: &str = "RESOLVED";

/// Binary health derived from the status feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthSignal {
    Healthy,
    Unhealthy,
}

impl HealthSignal {
    /// Healthy exactly when the title contains the resolution marker.
    pub fn from_title(title: &str) -> Self {
        if title.contains(RESOLUTION_MARKER) {
            HealthSignal::Healthy
        } else {
            HealthSignal::Unhealthy
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            HealthSignal::Healthy => StatusCode::NO_CONTENT,
            HealthSignal::Unhealthy => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthSignal::Healthy => "healthy",
            HealthSignal::Unhealthy => "unhealthy",
        }
    }
}

/// Probes an upstream RSS status feed.
pub struct StatusFeedProbe {
    client: reqwest::Client,
    feed_url: Url,
}

impl StatusFeedProbe {
    pub fn new(client: reqwest::Client, feed_url: Url) -> Self {
        Self { client, feed_url }
    }

    pub fn feed_url(&self) -> &Url {
        &self.feed_url
    }

    /// Fetch the feed and return its latest item title.
    pub async fn latest_title(&self) -> Result<String, GatewayError> {
        let response = self
            .client
            .get(self.feed_url.clone())
            .send()
            .await
            .map_err(|source| GatewayError::UpstreamNetwork {
                url: self.feed_url.to_string(),
                source,
            })?;

        let octets = response
            .bytes()
            .await
            .map_err(GatewayError::UpstreamBodyRead)?;

        Ok(feed::latest_item(&octets)?)
    }

    /// Evaluate health once. Every failure is logged and counts as unhealthy.
    pub async fn evaluate(&self) -> HealthSignal {
        let signal = match self.latest_title().await {
            Ok(title) => {
                let signal = HealthSignal::from_title(&title);
                if signal == HealthSignal::Unhealthy {
                    tracing::warn!(title = %title, "Latest status item is not resolved");
                } else {
                    tracing::debug!(title = %title, "Latest status item is resolved");
                }
                signal
            }
            Err(e @ GatewayError::Feed(_)) => {
                tracing::error!(feed = %self.feed_url, error = %e, "Error interpreting status feed");
                HealthSignal::Unhealthy
            }
            Err(e) => {
                tracing::error!(feed = %self.feed_url, error = %e, "Error getting status feed");
                HealthSignal::Unhealthy
            }
        };

        metrics::record_health_check(signal.as_str());
        signal
    }
}

/// Handler for `/health/`: 204 when healthy, 500 otherwise.
pub async fn health_handler(State(probe): State<Arc<StatusFeedProbe>>) -> StatusCode {
    probe.evaluate().await.status_code()
}
