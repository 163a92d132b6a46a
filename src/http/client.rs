//! Outbound HTTP client shared by the proxy and the health probe.

use std::time::Duration;

use crate::config::UpstreamConfig;

/// User agent sent upstream.
pub const USER_AGENT: &str = concat!("docs-gateway/", env!("CARGO_PKG_VERSION"));

/// Build the upstream client from configuration.
///
/// Without configured timeouts a stalled upstream holds its request open
/// until the peer gives up.
pub fn build_client(config: &UpstreamConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

    if let Some(secs) = config.connect_timeout_secs {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_and_without_timeouts() {
        let mut config = UpstreamConfig::default();
        assert!(build_client(&config).is_ok());

        config.connect_timeout_secs = Some(2);
        config.request_timeout_secs = Some(10);
        config.use_system_proxy = false;
        assert!(build_client(&config).is_ok());
    }
}
