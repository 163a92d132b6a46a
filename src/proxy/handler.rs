//! Documentation proxy handler.
//!
//! Every request that is not a health check is answered with the configured
//! documentation page. Only the fragment of the inbound request survives;
//! method, path, query, headers and body are dropped.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, Request, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::TryStreamExt;
use tokio_util::io::StreamReader;
use url::Url;

use crate::error::GatewayError;
use crate::observability::metrics;
use crate::proxy::body::body_channel;
use crate::proxy::copier::copy_response;
use crate::proxy::fragment::{upstream_url, Fragment};

/// Headers that describe a single connection and must not be relayed.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Forwards requests to a fixed documentation resource.
pub struct DocsProxy {
    client: reqwest::Client,
    docs_url: Url,
}

impl DocsProxy {
    pub fn new(client: reqwest::Client, docs_url: Url) -> Self {
        Self { client, docs_url }
    }

    /// The configured documentation URL.
    pub fn docs_url(&self) -> &Url {
        &self.docs_url
    }

    /// Upstream URL for a request carrying `fragment`.
    pub fn target_for(&self, fragment: Option<&Fragment>) -> Url {
        upstream_url(&self.docs_url, fragment)
    }

    /// Upstream URL for an inbound request. Only its fragment is consulted.
    pub fn target_of<B>(&self, request: &Request<B>) -> Url {
        self.target_for(Fragment::from_request(request).as_ref())
    }

    /// Issue the upstream GET and relay its status, headers and body.
    pub async fn forward(&self, request: Request<Body>) -> Response {
        let started = Instant::now();
        let target = self.target_of(&request);
        drop(request);

        tracing::debug!(upstream = %target, "Forwarding to docs upstream");

        match self.client.get(target.clone()).send().await {
            Ok(upstream) => relay(upstream, started),
            Err(source) => {
                let err = GatewayError::UpstreamNetwork {
                    url: target.to_string(),
                    source,
                };
                tracing::error!(error = %err, "Error fetching glossary term");
                metrics::record_proxy_request(err.status_code().as_u16(), started);
                err.into_response()
            }
        }
    }
}

/// Commit the upstream status and headers, then stream the body.
///
/// The upstream response moves into a copy task that owns it until the copy
/// ends; dropping it there releases the upstream connection on every path.
fn relay(upstream: reqwest::Response, started: Instant) -> Response {
    let status = upstream.status();
    metrics::record_proxy_request(status.as_u16(), started);

    let mut builder = Response::builder().status(status);
    if let Some(headers) = builder.headers_mut() {
        copy_headers(headers, upstream.headers());
    }

    let (mut writer, body) = body_channel();
    tokio::spawn(async move {
        let mut source = StreamReader::new(Box::pin(
            upstream.bytes_stream().map_err(io::Error::other),
        ));
        match copy_response(&mut writer, &mut source).await {
            Ok(bytes) => {
                tracing::debug!(bytes, "Upstream body relayed");
                metrics::record_proxy_bytes(bytes);
            }
            Err(e) => {
                tracing::warn!(
                    written = e.written(),
                    error = %e,
                    "Upstream body truncated"
                );
                metrics::record_proxy_bytes(e.written());
                writer.abort(io::Error::other(e)).await;
            }
        }
    });

    builder
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Copy end-to-end headers from `src` into `dst`, keeping repeated values.
///
/// Besides the fixed hop-by-hop set, any header named in `Connection` is
/// connection-scoped and skipped as well.
pub fn copy_headers(dst: &mut HeaderMap, src: &HeaderMap) {
    let listed = connection_listed(src);
    for (name, value) in src.iter() {
        if HOP_BY_HOP.contains(name) || listed.contains(name) {
            continue;
        }
        dst.append(name.clone(), value.clone());
    }
}

fn connection_listed(headers: &HeaderMap) -> Vec<HeaderName> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect()
}

/// Fallback handler for every non-health route.
pub async fn proxy_handler(
    State(proxy): State<Arc<DocsProxy>>,
    request: Request<Body>,
) -> Response {
    proxy.forward(request).await
}
