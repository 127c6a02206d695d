//! Request-preparation strategies.
//!
//! An [`EndpointKind`] describes how to turn a body object and per-call
//! auxiliary data into a concrete request: which auth header to set, which
//! HTTP method to use, how to encode the body. Strategies are zero-sized
//! types selected at the type level by an [`Endpoint`]; composite strategies
//! ([`Upload`], [`Edit`], [`Delete`]) are built by calling another strategy's
//! `prepare` as an ordinary function, then adjusting the result.
//!
//! The set here covers the common REST shapes; users can add their own by
//! implementing [`EndpointKind`] on a marker type.
//!
//! [`Endpoint`]: crate::Endpoint

use std::marker::PhantomData;

use base64::prelude::*;
use http::{header, HeaderValue, Method};
use serde::{Serialize, Serializer};

use crate::{draft::CachePolicy, EncodingOptions, Error, RequestDraft};

/// A strategy for preparing one request.
///
/// `RequestData` is the auxiliary data a call must supply beyond the body
/// object, typically authentication material; `()` when nothing is needed.
/// `RequestObject` is the body type; [`Empty`] when the strategy sends no
/// body.
///
/// `prepare` must be deterministic in its inputs and confine its effects to
/// the returned draft, so that re-invoking a failed call builds an identical
/// request.
pub trait EndpointKind {
    /// Per-call auxiliary data, beyond the body object.
    type RequestData;

    /// The request body type.
    type RequestObject: Serialize;

    /// Produces the prepared draft from a fresh one.
    fn prepare(
        draft: RequestDraft,
        body: Option<&Self::RequestObject>,
        data: &Self::RequestData,
        encoding: &EncodingOptions,
    ) -> Result<RequestDraft, Error>;
}

/// Stands in for a request body or response payload that does not exist.
///
/// `Empty` serializes as JSON `null` should it ever be encoded, but it is
/// deliberately not deserializable: the [`DataUploader`](crate::DataUploader)
/// specializations rely on that asymmetry to stay unambiguous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Empty;

impl Serialize for Empty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }
}

/// Credentials for HTTP Basic authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAccessToken {
    /// The account name.
    pub username: String,
    /// The account password.
    pub password: String,
}

impl BasicAccessToken {
    /// Creates a token from its parts.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

fn authorization_header(draft: RequestDraft, value: String) -> Result<RequestDraft, Error> {
    let value = HeaderValue::from_str(&value)
        .map_err(|e| Error::PreparationFailed(format!("invalid Authorization header: {e}")))?;
    Ok(draft.with_header_value(header::AUTHORIZATION, value))
}

/// An unauthenticated read endpoint.
///
/// Sets the cache policy to bypass local caches and leaves the method at its
/// GET default. No auxiliary data, no body.
#[derive(Debug, Clone, Copy)]
pub struct Public;

impl EndpointKind for Public {
    type RequestData = ();
    type RequestObject = Empty;

    fn prepare(
        draft: RequestDraft,
        _body: Option<&Empty>,
        _data: &(),
        _encoding: &EncodingOptions,
    ) -> Result<RequestDraft, Error> {
        Ok(draft.with_cache_policy(CachePolicy::BypassLocalCache))
    }
}

/// An endpoint guarded by HTTP Basic authentication.
///
/// Auxiliary data is a [`BasicAccessToken`]; `prepare` sets
/// `Authorization: Basic <base64(username:password)>`.
#[derive(Debug, Clone, Copy)]
pub struct BasicAuthenticated;

impl EndpointKind for BasicAuthenticated {
    type RequestData = BasicAccessToken;
    type RequestObject = Empty;

    fn prepare(
        draft: RequestDraft,
        _body: Option<&Empty>,
        data: &BasicAccessToken,
        _encoding: &EncodingOptions,
    ) -> Result<RequestDraft, Error> {
        let credentials = format!("{}:{}", data.username, data.password);
        authorization_header(
            draft,
            format!("Basic {}", BASE64_STANDARD.encode(credentials.as_bytes())),
        )
    }
}

/// An endpoint guarded by a bearer token.
///
/// Auxiliary data is the token string; `prepare` sets
/// `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy)]
pub struct BearerAuthenticated;

impl EndpointKind for BearerAuthenticated {
    type RequestData = String;
    type RequestObject = Empty;

    fn prepare(
        draft: RequestDraft,
        _body: Option<&Empty>,
        data: &String,
        _encoding: &EncodingOptions,
    ) -> Result<RequestDraft, Error> {
        authorization_header(draft, format!("Bearer {data}"))
    }
}

/// An unauthenticated write endpoint taking a JSON body of type `T`.
///
/// If a body is present it is encoded with the endpoint's
/// [`EncodingOptions`], `Content-Type: application/json` and
/// `Content-Length` are set, and the bytes are attached. The method is set
/// to POST unconditionally.
pub struct PublicUpload<T>(PhantomData<fn() -> T>);

impl<T: Serialize> EndpointKind for PublicUpload<T> {
    type RequestData = ();
    type RequestObject = T;

    fn prepare(
        mut draft: RequestDraft,
        body: Option<&T>,
        _data: &(),
        encoding: &EncodingOptions,
    ) -> Result<RequestDraft, Error> {
        if let Some(value) = body {
            let bytes = encoding.encode(value)?;
            draft = draft
                .with_header_value(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )
                .with_header_value(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()))
                .with_body(bytes);
        }
        Ok(draft.with_method(Method::POST))
    }
}

/// A bearer-authenticated write endpoint taking a JSON body of type `T`.
///
/// Applies [`BearerAuthenticated`] with the caller's token, then
/// [`PublicUpload<T>`] with the same body. Failure in either stage aborts
/// preparation. Method POST.
pub struct Upload<T>(PhantomData<fn() -> T>);

impl<T: Serialize> EndpointKind for Upload<T> {
    type RequestData = String;
    type RequestObject = T;

    fn prepare(
        draft: RequestDraft,
        body: Option<&T>,
        data: &String,
        encoding: &EncodingOptions,
    ) -> Result<RequestDraft, Error> {
        let draft = BearerAuthenticated::prepare(draft, None, data, encoding)?;
        PublicUpload::<T>::prepare(draft, body, &(), encoding)
    }
}

/// [`Upload<T>`] with the method overridden to PUT.
pub struct Edit<T>(PhantomData<fn() -> T>);

impl<T: Serialize> EndpointKind for Edit<T> {
    type RequestData = String;
    type RequestObject = T;

    fn prepare(
        draft: RequestDraft,
        body: Option<&T>,
        data: &String,
        encoding: &EncodingOptions,
    ) -> Result<RequestDraft, Error> {
        // The override must come after the upload stage, which sets POST.
        Ok(Upload::<T>::prepare(draft, body, data, encoding)?.with_method(Method::PUT))
    }
}

/// [`Upload<T>`] with the method overridden to DELETE.
pub struct Delete<T>(PhantomData<fn() -> T>);

impl<T: Serialize> EndpointKind for Delete<T> {
    type RequestData = String;
    type RequestObject = T;

    fn prepare(
        draft: RequestDraft,
        body: Option<&T>,
        data: &String,
        encoding: &EncodingOptions,
    ) -> Result<RequestDraft, Error> {
        Ok(Upload::<T>::prepare(draft, body, data, encoding)?.with_method(Method::DELETE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[derive(Serialize)]
    struct Person {
        name: String,
        age: u8,
    }

    fn person() -> Person {
        Person {
            name: "Tom".to_string(),
            age: 20,
        }
    }

    fn draft() -> RequestDraft {
        RequestDraft::new(Url::parse("http://h/model").unwrap())
    }

    fn options() -> EncodingOptions {
        EncodingOptions::new()
    }

    #[test]
    fn public_bypasses_local_cache_and_keeps_get() {
        let prepared = Public::prepare(draft(), None, &(), &options()).unwrap();
        assert_eq!(prepared.method, Method::GET);
        assert_eq!(prepared.cache_policy, CachePolicy::BypassLocalCache);
        assert!(prepared.body.is_none());
    }

    #[test]
    fn basic_sets_the_exact_authorization_header() {
        let token = BasicAccessToken::new("username", "password");
        let prepared = BasicAuthenticated::prepare(draft(), None, &token, &options()).unwrap();
        // base64("username:password")
        assert_eq!(
            prepared.headers.get("authorization").unwrap(),
            "Basic dXNlcm5hbWU6cGFzc3dvcmQ="
        );
    }

    #[test]
    fn bearer_sets_the_exact_authorization_header() {
        let token = "abcde".to_string();
        let prepared = BearerAuthenticated::prepare(draft(), None, &token, &options()).unwrap();
        assert_eq!(prepared.headers.get("authorization").unwrap(), "Bearer abcde");
    }

    #[test]
    fn bearer_rejects_tokens_that_cannot_be_header_values() {
        let token = "bad\ntoken".to_string();
        let err = BearerAuthenticated::prepare(draft(), None, &token, &options()).unwrap_err();
        assert!(matches!(err, Error::PreparationFailed(_)));
    }

    #[test]
    fn public_upload_encodes_the_body_and_posts() {
        let prepared =
            PublicUpload::<Person>::prepare(draft(), Some(&person()), &(), &options()).unwrap();
        assert_eq!(prepared.method, Method::POST);
        assert_eq!(
            prepared.headers.get("content-type").unwrap(),
            "application/json"
        );
        let body = prepared.body.as_deref().unwrap();
        assert_eq!(body, br#"{"name":"Tom","age":20}"#);
        assert_eq!(
            prepared.headers.get("content-length").unwrap(),
            &body.len().to_string()
        );
    }

    #[test]
    fn public_upload_without_a_body_still_posts() {
        let prepared = PublicUpload::<Person>::prepare(draft(), None, &(), &options()).unwrap();
        assert_eq!(prepared.method, Method::POST);
        assert!(prepared.body.is_none());
        assert!(prepared.headers.get("content-type").is_none());
    }

    #[test]
    fn upload_composes_bearer_auth_with_the_upload_stage() {
        let token = "abcde".to_string();
        let prepared =
            Upload::<Person>::prepare(draft(), Some(&person()), &token, &options()).unwrap();
        assert_eq!(prepared.method, Method::POST);
        assert_eq!(prepared.headers.get("authorization").unwrap(), "Bearer abcde");
        assert_eq!(
            prepared.body.as_deref().unwrap(),
            br#"{"name":"Tom","age":20}"#
        );
    }

    #[test]
    fn edit_matches_upload_except_for_the_method() {
        let token = "abcde".to_string();
        let uploaded =
            Upload::<Person>::prepare(draft(), Some(&person()), &token, &options()).unwrap();
        let edited = Edit::<Person>::prepare(draft(), Some(&person()), &token, &options()).unwrap();

        assert_eq!(edited.method, Method::PUT);
        assert_eq!(edited.headers, uploaded.headers);
        assert_eq!(edited.body, uploaded.body);
    }

    #[test]
    fn delete_matches_upload_except_for_the_method() {
        let token = "abcde".to_string();
        let uploaded =
            Upload::<Person>::prepare(draft(), Some(&person()), &token, &options()).unwrap();
        let deleted =
            Delete::<Person>::prepare(draft(), Some(&person()), &token, &options()).unwrap();

        assert_eq!(deleted.method, Method::DELETE);
        assert_eq!(deleted.headers, uploaded.headers);
        assert_eq!(deleted.body, uploaded.body);
    }

    #[test]
    fn preparation_is_deterministic() {
        let token = "abcde".to_string();
        let first = Edit::<Person>::prepare(draft(), Some(&person()), &token, &options()).unwrap();
        let second = Edit::<Person>::prepare(draft(), Some(&person()), &token, &options()).unwrap();
        assert_eq!(first, second);
    }
}
