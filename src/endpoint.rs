//! Typed descriptions of REST resources.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use url::Url;

use crate::{kinds::EndpointKind, EncodingOptions, Error, RequestDraft};

type CustomizeHook = Arc<dyn Fn(RequestDraft) -> RequestDraft + Send + Sync>;

/// A value describing one REST resource.
///
/// An endpoint couples a URL with a preparation strategy `K` (auth scheme,
/// HTTP method, body encoding) and the response type the caller expects.
/// Both type parameters are fixed at construction; the value itself is
/// immutable and cheap to clone.
///
/// Building a request from an endpoint is pure: calling
/// [`make_request`](Endpoint::make_request) twice with the same inputs yields
/// structurally equal drafts.
///
/// # Examples
///
/// ```
/// use courier::{kinds, Endpoint};
/// use http::header::{HeaderValue, ACCEPT};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct NewArticle { title: String }
///
/// #[derive(Deserialize)]
/// struct Article { id: u64, title: String }
///
/// # fn example() -> Result<(), courier::Error> {
/// // A bearer-authenticated create endpoint.
/// let create: Endpoint<kinds::Upload<NewArticle>, Article> =
///     Endpoint::new("https://api.example.com/articles")?;
///
/// // A public read endpoint with a customization hook.
/// let latest: Endpoint<kinds::Public, Article> =
///     Endpoint::new("https://api.example.com/articles/latest")?
///         .with_customize(|draft| {
///             draft.with_header_value(ACCEPT, HeaderValue::from_static("application/json"))
///         });
/// # Ok(())
/// # }
/// ```
pub struct Endpoint<K, Response> {
    url: Url,
    customize: Option<CustomizeHook>,
    encoding: EncodingOptions,
    login_attempt: bool,
    _marker: PhantomData<fn() -> (K, Response)>,
}

impl<K: EndpointKind, Response> Endpoint<K, Response> {
    /// Creates an endpoint from a URL string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the string does not parse.
    pub fn new(url: impl AsRef<str>) -> Result<Self, Error> {
        Ok(Self::from_url(Url::parse(url.as_ref())?))
    }

    /// Creates an endpoint from an already-parsed URL.
    pub fn from_url(url: Url) -> Self {
        Self {
            url,
            customize: None,
            encoding: EncodingOptions::default(),
            login_attempt: false,
            _marker: PhantomData,
        }
    }

    /// Installs a customization hook.
    ///
    /// The hook runs after the strategy's preparation and its return value is
    /// used verbatim. It may override anything the strategy set, including
    /// the method and headers; that permissiveness is the point of the hook,
    /// and nothing re-validates its output.
    pub fn with_customize(
        mut self,
        hook: impl Fn(RequestDraft) -> RequestDraft + Send + Sync + 'static,
    ) -> Self {
        self.customize = Some(Arc::new(hook));
        self
    }

    /// Overrides the body encoder/decoder configuration.
    pub fn with_encoding(mut self, encoding: EncodingOptions) -> Self {
        self.encoding = encoding;
        self
    }

    /// Marks this endpoint as a login attempt.
    ///
    /// A 401/403 response then surfaces as [`Error::LoginInvalid`] instead of
    /// [`Error::PermissionDenied`].
    pub fn login_attempt(mut self) -> Self {
        self.login_attempt = true;
        self
    }

    /// The URL this endpoint targets.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The encoder/decoder configuration for this endpoint.
    pub fn encoding(&self) -> &EncodingOptions {
        &self.encoding
    }

    /// Whether 401/403 responses should be read as a rejected login.
    pub fn is_login_attempt(&self) -> bool {
        self.login_attempt
    }

    /// Builds the concrete request for one call.
    ///
    /// Starts a fresh draft at this endpoint's URL, delegates to the
    /// strategy's `prepare`, then passes the result through the
    /// customization hook if one is installed.
    ///
    /// # Errors
    ///
    /// Propagates the strategy's preparation error.
    pub fn make_request(
        &self,
        body: Option<&K::RequestObject>,
        data: &K::RequestData,
    ) -> Result<RequestDraft, Error> {
        let draft = RequestDraft::new(self.url.clone());
        let draft = K::prepare(draft, body, data, &self.encoding)?;
        Ok(match &self.customize {
            Some(hook) => hook(draft),
            None => draft,
        })
    }
}

impl<K, Response> Clone for Endpoint<K, Response> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            customize: self.customize.clone(),
            encoding: self.encoding,
            login_attempt: self.login_attempt,
            _marker: PhantomData,
        }
    }
}

impl<K, Response> fmt::Debug for Endpoint<K, Response> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("url", &self.url.as_str())
            .field("customized", &self.customize.is_some())
            .field("login_attempt", &self.login_attempt)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds;
    use http::Method;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Person {
        name: String,
        age: u8,
    }

    #[test]
    fn rejects_unparseable_urls() {
        let result = Endpoint::<kinds::Public, ()>::new("not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn make_request_is_deterministic() {
        let endpoint: Endpoint<kinds::Upload<Person>, ()> =
            Endpoint::new("http://h/model").unwrap();
        let person = Person {
            name: "Tom".to_string(),
            age: 20,
        };
        let token = "abcde".to_string();

        let first = endpoint.make_request(Some(&person), &token).unwrap();
        let second = endpoint.make_request(Some(&person), &token).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn customize_hook_output_is_used_verbatim() {
        // The hook may override what the strategy set, here the method.
        let endpoint: Endpoint<kinds::Upload<Person>, ()> = Endpoint::new("http://h/model")
            .unwrap()
            .with_customize(|draft| draft.with_method(Method::PATCH));
        let person = Person {
            name: "Tom".to_string(),
            age: 20,
        };

        let draft = endpoint.make_request(Some(&person), &"t".to_string()).unwrap();
        assert_eq!(draft.method, Method::PATCH);
        assert_eq!(draft.headers.get("authorization").unwrap(), "Bearer t");
    }

    #[test]
    fn strategy_failures_propagate_through_make_request() {
        let endpoint: Endpoint<kinds::BearerAuthenticated, ()> =
            Endpoint::new("http://h/private").unwrap();
        let err = endpoint
            .make_request(None, &"bad\ntoken".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::PreparationFailed(_)));
    }
}
