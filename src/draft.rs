//! The intermediate request value built up during preparation.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

use crate::Error;

/// How the request interacts with caches between the client and the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Whatever the transport does by default.
    #[default]
    TransportDefault,

    /// Ask intermediaries to revalidate instead of serving a cached copy.
    ///
    /// Expressed as `Cache-Control: no-cache` on the outgoing request.
    BypassLocalCache,
}

/// A request description under construction.
///
/// A draft targets one fixed URL; its method, headers, body, and cache policy
/// are filled in by an [`EndpointKind`]'s preparation step and, optionally, an
/// endpoint's customization hook. Every mutation consumes the draft and
/// returns the updated value, so preparation is a chain of pure steps with no
/// shared state.
///
/// [`EndpointKind`]: crate::EndpointKind
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDraft {
    url: Url,

    /// The HTTP method. Defaults to GET.
    pub method: Method,

    /// Headers accumulated by preparation steps.
    pub headers: HeaderMap,

    /// The encoded request body, if any.
    pub body: Option<Vec<u8>>,

    /// Cache interaction for this request.
    pub cache_policy: CachePolicy,
}

impl RequestDraft {
    /// Creates a fresh draft targeting `url`: method GET, no headers, no body.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            cache_policy: CachePolicy::default(),
        }
    }

    /// The URL this draft targets. Fixed at creation.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Replaces the HTTP method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets a header from string parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreparationFailed`] if the header name or value is
    /// invalid.
    pub fn with_header(self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self, Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::PreparationFailed(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::PreparationFailed(format!("invalid header value: {e}")))?;
        Ok(self.with_header_value(name, value))
    }

    /// Sets a header from already-validated parts. Replaces any previous
    /// value for the same name.
    pub fn with_header_value(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attaches the encoded body bytes.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Replaces the cache policy.
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RequestDraft {
        RequestDraft::new(Url::parse("http://h/model").unwrap())
    }

    #[test]
    fn fresh_draft_defaults_to_get_with_no_body() {
        let draft = draft();
        assert_eq!(draft.method, Method::GET);
        assert!(draft.headers.is_empty());
        assert!(draft.body.is_none());
        assert_eq!(draft.cache_policy, CachePolicy::TransportDefault);
    }

    #[test]
    fn with_header_rejects_invalid_values() {
        let err = draft().with_header("Authorization", "line\nbreak").unwrap_err();
        assert!(matches!(err, Error::PreparationFailed(_)));
    }

    #[test]
    fn later_headers_replace_earlier_ones() {
        let draft = draft()
            .with_header("X-Tag", "one")
            .unwrap()
            .with_header("X-Tag", "two")
            .unwrap();
        assert_eq!(draft.headers.get("x-tag").unwrap(), "two");
        assert_eq!(draft.headers.len(), 1);
    }
}
