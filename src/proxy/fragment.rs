//! Inbound fragment extraction.
//!
//! HTTP request targets never carry a `#fragment` on the wire, so the
//! fragment travels in an explicit field instead: a [`Fragment`] request
//! extension, or failing that the `x-fragment` header.

use axum::http::{HeaderName, Request};
use url::Url;

/// Header carrying the fragment when no extension is present.
pub const X_FRAGMENT: HeaderName = HeaderName::from_static("x-fragment");

/// URL fragment of an inbound request, without the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(pub String);

impl Fragment {
    /// Fragment of the request, if any. Empty fragments count as absent.
    pub fn from_request<B>(request: &Request<B>) -> Option<Fragment> {
        let fragment = match request.extensions().get::<Fragment>() {
            Some(fragment) => Some(fragment.0.clone()),
            None => request
                .headers()
                .get(&X_FRAGMENT)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.trim_start_matches('#').to_string()),
        };

        fragment.filter(|f| !f.is_empty()).map(Fragment)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The upstream URL for a request: `base` with its fragment replaced.
pub fn upstream_url(base: &Url, fragment: Option<&Fragment>) -> Url {
    let mut url = base.clone();
    url.set_fragment(fragment.map(Fragment::as_str));
    url
}
