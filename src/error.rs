//! Error types for HTTP API calls, plus the status-validation step.
//!
//! This module provides one closed error taxonomy covering everything that can
//! go wrong between describing a request and decoding its response: request
//! preparation, the transport, the HTTP status contract, and body decoding.
//! All errors are per-call values; nothing in this crate retries or treats an
//! error as fatal to the process.

use http::StatusCode;

/// The main error type for HTTP API calls.
///
/// Every failure mode of the request pipeline maps to exactly one variant.
/// Retrying is entirely the caller's responsibility; re-invoking the same
/// call is always safe because request preparation is deterministic.
///
/// # Examples
///
/// ```no_run
/// use courier::{kinds, Client, Endpoint, Error};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Account { id: u64 }
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new()?;
/// let endpoint: Endpoint<kinds::Public, Account> =
///     Endpoint::new("https://api.example.com/account")?;
///
/// match client.execute(&endpoint, None, &()).await {
///     Ok(account) => println!("Account {}", account.id),
///     Err(Error::PermissionDenied { status }) => {
///         eprintln!("Access denied ({status})");
///     }
///     Err(Error::InvalidData { raw_response, serde_error }) => {
///         eprintln!("Undecodable response: {serde_error}");
///         eprintln!("  Raw body: {raw_response}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A strategy or customization hook could not build a valid request.
    ///
    /// Raised before any network interaction, e.g. when the request body
    /// cannot be serialized or authentication material cannot be expressed
    /// as a header value.
    #[error("Failed to prepare request: {0}")]
    PreparationFailed(String),

    /// The transport produced something that is not a readable HTTP response.
    ///
    /// The status line arrived but the response body stream could not be
    /// read back. Failures before or during send are [`Error::Transport`].
    #[error("Invalid HTTP response: {0}")]
    InvalidResponse(String),

    /// The server answered 401 or 403 outside a login context.
    #[error("Permission denied (status {status})")]
    PermissionDenied {
        /// The exact status the server returned, 401 or 403.
        status: StatusCode,
    },

    /// The server answered 401 or 403 for a login attempt.
    ///
    /// Endpoints opt into this interpretation with
    /// [`Endpoint::login_attempt`](crate::Endpoint::login_attempt).
    #[error("Login rejected by the server")]
    LoginInvalid,

    /// The server answered with a non-2xx status other than 401/403.
    ///
    /// The response body is never read on this path, so the error carries
    /// only the literal status code.
    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// The status code the server returned.
        status: StatusCode,
    },

    /// The response body could not be decoded into the expected type.
    ///
    /// Preserves both the raw response text and the decoder's message,
    /// making it easy to debug schema drift in production.
    #[error("Failed to decode response: {serde_error}")]
    InvalidData {
        /// The raw response body that failed to decode.
        raw_response: String,
        /// The decoder's error message.
        serde_error: String,
    },

    /// The underlying transport failed (connection, DNS, TLS, timeout).
    ///
    /// Wraps the `reqwest` error as the cause; this layer does not
    /// distinguish transport failures further.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid client or builder configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    ///
    /// `Some(status)` for [`Error::PermissionDenied`] and
    /// [`Error::UnexpectedStatus`], `None` otherwise.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::PermissionDenied { status } => Some(*status),
            Error::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this error reports rejected credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::PermissionDenied { status: StatusCode::FORBIDDEN };
    /// assert!(err.is_auth_error());
    ///
    /// let err = Error::UnexpectedStatus { status: StatusCode::NOT_FOUND };
    /// assert!(!err.is_auth_error());
    /// ```
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::PermissionDenied { .. } | Error::LoginInvalid)
    }

    /// Returns the raw response body if this error preserved one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::InvalidData { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for HTTP API calls.
///
/// This is a convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Maps an HTTP status to success or the matching error.
///
/// The contract:
/// - any status in `[200, 299]` is success;
/// - 401 and 403 are [`Error::PermissionDenied`], or [`Error::LoginInvalid`]
///   when `is_login_attempt` is set;
/// - every other status is [`Error::UnexpectedStatus`] carrying the literal
///   code.
///
/// The execution layer runs this before reading the response body, so a
/// non-2xx body is never decoded.
///
/// # Examples
///
/// ```
/// use courier::validate_status;
/// use http::StatusCode;
///
/// assert!(validate_status(StatusCode::OK, false).is_ok());
///
/// let err = validate_status(StatusCode::NOT_FOUND, false).unwrap_err();
/// assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
/// ```
pub fn validate_status(status: StatusCode, is_login_attempt: bool) -> Result<()> {
    match status.as_u16() {
        200..=299 => Ok(()),
        401 | 403 if is_login_attempt => Err(Error::LoginInvalid),
        401 | 403 => Err(Error::PermissionDenied { status }),
        _ => Err(Error::UnexpectedStatus { status }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_2xx_status() {
        for code in 200..=299 {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(validate_status(status, false).is_ok(), "status {code}");
            assert!(validate_status(status, true).is_ok(), "status {code}");
        }
    }

    #[test]
    fn maps_401_and_403_to_permission_denied() {
        for code in [401, 403] {
            let status = StatusCode::from_u16(code).unwrap();
            match validate_status(status, false) {
                Err(Error::PermissionDenied { status: s }) => assert_eq!(s, status),
                other => panic!("expected PermissionDenied for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn maps_401_and_403_to_login_invalid_for_login_attempts() {
        for code in [401, 403] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(matches!(
                validate_status(status, true),
                Err(Error::LoginInvalid)
            ));
        }
    }

    #[test]
    fn preserves_the_literal_code_for_other_statuses() {
        for code in [100, 199, 300, 400, 404, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            match validate_status(status, false) {
                Err(Error::UnexpectedStatus { status: s }) => assert_eq!(s.as_u16(), code),
                other => panic!("expected UnexpectedStatus for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn auth_error_classification() {
        assert!(Error::LoginInvalid.is_auth_error());
        assert!(Error::PermissionDenied {
            status: StatusCode::UNAUTHORIZED
        }
        .is_auth_error());
        assert!(!Error::UnexpectedStatus {
            status: StatusCode::BAD_GATEWAY
        }
        .is_auth_error());
        assert!(!Error::PreparationFailed("boom".to_string()).is_auth_error());
    }
}
