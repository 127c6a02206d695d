//! HTTP request execution with status validation and rich error handling.
//!
//! The [`Client`] type executes requests described by [`Endpoint`] values.
//! Use [`ClientBuilder`] to configure and create clients.

use std::sync::Arc;
use std::time::{Duration, Instant};

use http::{header, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::{
    draft::CachePolicy,
    error::validate_status,
    kinds::{Empty, EndpointKind},
    Endpoint, Error, Result,
};

/// Executes requests described by endpoints.
///
/// The client is designed to be reused across calls: it holds the pooled
/// transport connection and configuration applying to every request. Cloning
/// is cheap and clones share the pool.
///
/// Every call is single-shot: one request, one response, no retry and no
/// backoff. Dropping the returned future before completion aborts the
/// in-flight network call; neither decoding nor any continuation runs after
/// cancellation.
///
/// # Examples
///
/// ```no_run
/// use courier::{kinds, Client, Endpoint};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Article { id: u64, title: String }
///
/// # async fn example() -> Result<(), courier::Error> {
/// let client = Client::builder()
///     .user_agent("my-app/1.0")?
///     .build()?;
///
/// let endpoint: Endpoint<kinds::Public, Article> =
///     Endpoint::new("https://api.example.com/articles/1")?;
/// let article = client.execute(&endpoint, None, &()).await?;
/// println!("{}", article.title);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if the transport cannot be
    /// initialized.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Executes the endpoint and decodes the response body.
    ///
    /// Builds the request via the endpoint's strategy, sends it, validates
    /// the HTTP status, then decodes the body with the endpoint's
    /// [`EncodingOptions`](crate::EncodingOptions). Decode failure is
    /// [`Error::InvalidData`] with the raw body preserved.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use courier::{kinds, Client, Endpoint};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Serialize)]
    /// struct NewArticle { title: String }
    ///
    /// #[derive(Deserialize)]
    /// struct Article { id: u64, title: String }
    ///
    /// # async fn example() -> Result<(), courier::Error> {
    /// let client = Client::new()?;
    /// let endpoint: Endpoint<kinds::Upload<NewArticle>, Article> =
    ///     Endpoint::new("https://api.example.com/articles")?;
    ///
    /// let draft = NewArticle { title: "Hello".to_string() };
    /// let token = "secret-token".to_string();
    /// let created = client.execute(&endpoint, Some(&draft), &token).await?;
    /// println!("Created article {}", created.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute<K, Res>(
        &self,
        endpoint: &Endpoint<K, Res>,
        body: Option<&K::RequestObject>,
        data: &K::RequestData,
    ) -> Result<Res>
    where
        K: EndpointKind,
        Res: DeserializeOwned,
    {
        let response = self.dispatch(endpoint, body, data).await?;
        let bytes = read_body(response).await?;
        match endpoint.encoding().decode(&bytes) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode response body");
                Err(e)
            }
        }
    }

    /// Executes the endpoint and returns the response body as text.
    ///
    /// The body is decoded as UTF-8 and never JSON-decoded; invalid UTF-8 is
    /// [`Error::InvalidData`].
    pub async fn execute_for_text<K, Res>(
        &self,
        endpoint: &Endpoint<K, Res>,
        body: Option<&K::RequestObject>,
        data: &K::RequestData,
    ) -> Result<String>
    where
        K: EndpointKind,
    {
        let response = self.dispatch(endpoint, body, data).await?;
        let bytes = read_body(response).await?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidData {
            raw_response: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            serde_error: e.to_string(),
        })
    }

    /// Executes the endpoint and discards the response body.
    ///
    /// The body is never read; only the status is validated. Used with
    /// endpoints whose response type is the [`Empty`] sentinel.
    pub async fn execute_ignoring_body<K>(
        &self,
        endpoint: &Endpoint<K, Empty>,
        body: Option<&K::RequestObject>,
        data: &K::RequestData,
    ) -> Result<()>
    where
        K: EndpointKind,
    {
        self.dispatch(endpoint, body, data).await?;
        Ok(())
    }

    /// Builds, sends, and status-checks one request.
    ///
    /// Status validation runs before any body read, so a non-2xx body is
    /// never touched.
    async fn dispatch<K, Res>(
        &self,
        endpoint: &Endpoint<K, Res>,
        body: Option<&K::RequestObject>,
        data: &K::RequestData,
    ) -> Result<reqwest::Response>
    where
        K: EndpointKind,
    {
        let draft = endpoint.make_request(body, data)?;
        let started = Instant::now();

        tracing::debug!(
            method = %draft.method,
            url = %draft.url(),
            "Executing HTTP request"
        );

        let mut request = self
            .inner
            .http_client
            .request(draft.method.clone(), draft.url().clone());

        // Defaults first so per-request preparation wins on conflicts.
        let mut headers = self.inner.default_headers.clone();
        for (name, value) in draft.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        if draft.cache_policy == CachePolicy::BypassLocalCache {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        }
        request = request.headers(headers);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(bytes) = draft.body {
            request = request.body(bytes);
        }

        let response = request.send().await?;

        let status = response.status();
        tracing::info!(
            status = status.as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "Received HTTP response"
        );

        if let Err(e) = validate_status(status, endpoint.is_login_attempt()) {
            tracing::warn!(
                status = status.as_u16(),
                url = %endpoint.url(),
                "Response failed status validation"
            );
            return Err(e);
        }

        Ok(response)
    }
}

/// Reads the validated response's body bytes.
///
/// A body stream that cannot be read back is [`Error::InvalidResponse`];
/// at this point the status line already arrived, so the failure is in the
/// response itself rather than the connection attempt.
async fn read_body(response: reqwest::Response) -> Result<Vec<u8>> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::InvalidResponse(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use courier::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), courier::Error> {
/// let client = ClientBuilder::new()
///     .timeout(Duration::from_secs(30))
///     .default_header("X-Api-Version", "2")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Adds a default header included in every request.
    ///
    /// Headers set by an endpoint's strategy or customization hook take
    /// precedence over defaults with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the `User-Agent` sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid header value.
    pub fn user_agent(self, value: impl AsRef<str>) -> Result<Self> {
        self.default_header(header::USER_AGENT.as_str(), value)
    }

    /// Sets a per-request timeout on the transport.
    ///
    /// Expiry surfaces as [`Error::Transport`]; this layer adds no timeout
    /// policy of its own.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if the transport cannot be
    /// initialized.
    pub fn build(self) -> Result<Client> {
        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
