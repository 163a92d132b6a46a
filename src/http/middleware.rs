//! Request interceptor pipeline.
//!
//! Interceptors are composed once at startup, in order, into a single
//! [`Pipeline`] that runs as one axum middleware layer around the router.
//! Request hooks run in list order before dispatch; response hooks run in
//! reverse order after the handler returns.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Response header carrying the gateway version.
pub const X_PROXY_VERSION: HeaderName = HeaderName::from_static("x-proxy-version");

/// Version reported in [`X_PROXY_VERSION`].
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A hook around every request.
pub trait Interceptor: Send + Sync {
    /// Called before the request is dispatched.
    fn on_request(&self, _request: &Request<Body>) {}

    /// Called with the handler's response before it is sent.
    fn on_response(&self, _response: &mut Response) {}
}

/// Tags every response with the running version.
pub struct VersionTag {
    value: HeaderValue,
}

impl VersionTag {
    pub fn new(version: &'static str) -> Self {
        Self {
            value: HeaderValue::from_static(version),
        }
    }
}

impl Interceptor for VersionTag {
    fn on_response(&self, response: &mut Response) {
        response
            .headers_mut()
            .insert(X_PROXY_VERSION, self.value.clone());
    }
}

/// Logs the URL of every inbound request.
pub struct RequestLogger;

impl Interceptor for RequestLogger {
    fn on_request(&self, request: &Request<Body>) {
        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info!(
            method = %request.method(),
            host = %host,
            url = %request.uri(),
            "Inbound request"
        );
    }
}

/// Ordered, immutable list of interceptors.
#[derive(Clone, Default)]
pub struct Pipeline {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The gateway's pipeline: version tag, then request logger.
    pub fn standard() -> Self {
        Self::new()
            .with(VersionTag::new(VERSION))
            .with(RequestLogger)
    }

    /// Append an interceptor; it runs after those already present.
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run the request through every interceptor and `next`.
    pub async fn run(&self, request: Request<Body>, next: Next) -> Response {
        for interceptor in &self.interceptors {
            interceptor.on_request(&request);
        }

        let mut response = next.run(request).await;

        for interceptor in self.interceptors.iter().rev() {
            interceptor.on_response(&mut response);
        }
        response
    }
}

/// Middleware entry point, installed with `from_fn_with_state`.
pub async fn intercept(
    State(pipeline): State<Arc<Pipeline>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    pipeline.run(request, next).await
}
