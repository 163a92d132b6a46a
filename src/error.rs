//! Request-path and startup error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::feed::FeedError;

/// Failures while serving a request.
///
/// The caller only ever observes an HTTP 500; the variant is for the logs.
/// Body copy failures are reported separately as
/// [`CopyError`](crate::proxy::copier::CopyError) because they happen after
/// the status line has been committed.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The upstream could not be reached or did not answer.
    #[error("upstream request to {url} failed: {source}")]
    UpstreamNetwork {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered but its body could not be read.
    #[error("reading upstream body failed: {0}")]
    UpstreamBodyRead(#[source] reqwest::Error),

    /// The status feed could not be interpreted.
    #[error(transparent)]
    Feed(#[from] FeedError),
}

impl GatewayError {
    /// Status code reported to the caller.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        self.status_code().into_response()
    }
}

/// Failures while assembling the server. All of them are fatal.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{field}: invalid URL: {source}")]
    Url {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid bind address {0:?}")]
    BindAddress(String),
}
