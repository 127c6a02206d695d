//! Self-describing upload objects.
//!
//! A [`DataUploader`] is a serializable value that knows its own
//! [`Endpoint`]: a transient command object created per call, with no
//! lifecycle of its own. Given a [`Client`], it can send itself.
//!
//! The `upload` operation comes in four shapes, selected at compile time by
//! the relationship between the value's own type, the strategy's body type,
//! and the declared response type:
//!
//! | body type | response type | trait | `upload` returns |
//! |---|---|---|---|
//! | `Self` | decodable | [`UploadWithResponse`] | the decoded response |
//! | [`Empty`] | decodable | [`UploadWithoutBody`] | the decoded response |
//! | `Self` | [`Empty`] | [`UploadWithoutResponse`] | `()` |
//! | [`Empty`] | [`Empty`] | [`UploadBare`] | `()` |
//!
//! Exactly one trait applies per concrete type combination; [`Empty`] is not
//! deserializable, which keeps the "decodable response" and "no response"
//! rows disjoint. If a pathological type ever satisfies two rows, the call
//! site fails to compile with an ambiguity error rather than picking one at
//! runtime.
//!
//! Each trait also provides `upload_unauthenticated` for strategies that
//! need no auxiliary data.

#![allow(async_fn_in_trait)]

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    kinds::{Empty, EndpointKind},
    Client, Endpoint, Result,
};

/// A serializable object that can describe its own target endpoint.
///
/// # Examples
///
/// ```
/// use courier::{kinds, DataUploader, Endpoint};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct Measurement { sensor: String, value: f64 }
///
/// #[derive(Deserialize)]
/// struct Receipt { id: u64 }
///
/// impl DataUploader for Measurement {
///     type Kind = kinds::Upload<Measurement>;
///     type Response = Receipt;
///
///     fn endpoint(&self) -> Endpoint<Self::Kind, Self::Response> {
///         Endpoint::new("https://api.example.com/measurements")
///             .expect("static URL is valid")
///     }
/// }
/// ```
pub trait DataUploader: Serialize {
    /// The preparation strategy for the upload.
    type Kind: EndpointKind;

    /// The expected response type; [`Empty`] to discard the response.
    type Response;

    /// The endpoint this value sends itself to.
    fn endpoint(&self) -> Endpoint<Self::Kind, Self::Response>;
}

/// Upload shape: the value is the body, the response is decoded.
pub trait UploadWithResponse: DataUploader {
    /// Serializes `self` as the request body and returns the decoded
    /// response.
    async fn upload(
        &self,
        client: &Client,
        data: &<Self::Kind as EndpointKind>::RequestData,
    ) -> Result<Self::Response>;

    /// [`upload`](UploadWithResponse::upload) for strategies that need no
    /// auxiliary data.
    async fn upload_unauthenticated(&self, client: &Client) -> Result<Self::Response>
    where
        Self::Kind: EndpointKind<RequestData = ()>;
}

impl<U> UploadWithResponse for U
where
    U: DataUploader,
    U::Kind: EndpointKind<RequestObject = U>,
    U::Response: DeserializeOwned,
{
    async fn upload(
        &self,
        client: &Client,
        data: &<U::Kind as EndpointKind>::RequestData,
    ) -> Result<U::Response> {
        client.execute(&self.endpoint(), Some(self), data).await
    }

    async fn upload_unauthenticated(&self, client: &Client) -> Result<U::Response>
    where
        U::Kind: EndpointKind<RequestData = ()>,
    {
        UploadWithResponse::upload(self, client, &()).await
    }
}

/// Upload shape: no body is sent, the response is decoded.
///
/// A pure query through a write-shaped endpoint: the value exists only to
/// name the endpoint and the response type.
pub trait UploadWithoutBody: DataUploader {
    /// Sends no body and returns the decoded response.
    async fn upload(
        &self,
        client: &Client,
        data: &<Self::Kind as EndpointKind>::RequestData,
    ) -> Result<Self::Response>;

    /// [`upload`](UploadWithoutBody::upload) for strategies that need no
    /// auxiliary data.
    async fn upload_unauthenticated(&self, client: &Client) -> Result<Self::Response>
    where
        Self::Kind: EndpointKind<RequestData = ()>;
}

impl<U> UploadWithoutBody for U
where
    U: DataUploader,
    U::Kind: EndpointKind<RequestObject = Empty>,
    U::Response: DeserializeOwned,
{
    async fn upload(
        &self,
        client: &Client,
        data: &<U::Kind as EndpointKind>::RequestData,
    ) -> Result<U::Response> {
        client.execute(&self.endpoint(), None, data).await
    }

    async fn upload_unauthenticated(&self, client: &Client) -> Result<U::Response>
    where
        U::Kind: EndpointKind<RequestData = ()>,
    {
        UploadWithoutBody::upload(self, client, &()).await
    }
}

/// Upload shape: the value is the body, the response is discarded.
pub trait UploadWithoutResponse: DataUploader {
    /// Serializes `self` as the request body; the response body is never
    /// read.
    async fn upload(
        &self,
        client: &Client,
        data: &<Self::Kind as EndpointKind>::RequestData,
    ) -> Result<()>;

    /// [`upload`](UploadWithoutResponse::upload) for strategies that need no
    /// auxiliary data.
    async fn upload_unauthenticated(&self, client: &Client) -> Result<()>
    where
        Self::Kind: EndpointKind<RequestData = ()>;
}

impl<U> UploadWithoutResponse for U
where
    U: DataUploader<Response = Empty>,
    U::Kind: EndpointKind<RequestObject = U>,
{
    async fn upload(
        &self,
        client: &Client,
        data: &<U::Kind as EndpointKind>::RequestData,
    ) -> Result<()> {
        client
            .execute_ignoring_body(&self.endpoint(), Some(self), data)
            .await
    }

    async fn upload_unauthenticated(&self, client: &Client) -> Result<()>
    where
        U::Kind: EndpointKind<RequestData = ()>,
    {
        UploadWithoutResponse::upload(self, client, &()).await
    }
}

/// Upload shape: no body, no response; the call is a bare trigger.
pub trait UploadBare: DataUploader {
    /// Sends no body; the response body is never read.
    async fn upload(
        &self,
        client: &Client,
        data: &<Self::Kind as EndpointKind>::RequestData,
    ) -> Result<()>;

    /// [`upload`](UploadBare::upload) for strategies that need no auxiliary
    /// data.
    async fn upload_unauthenticated(&self, client: &Client) -> Result<()>
    where
        Self::Kind: EndpointKind<RequestData = ()>;
}

impl<U> UploadBare for U
where
    U: DataUploader<Response = Empty>,
    U::Kind: EndpointKind<RequestObject = Empty>,
{
    async fn upload(
        &self,
        client: &Client,
        data: &<U::Kind as EndpointKind>::RequestData,
    ) -> Result<()> {
        client
            .execute_ignoring_body(&self.endpoint(), None, data)
            .await
    }

    async fn upload_unauthenticated(&self, client: &Client) -> Result<()>
    where
        U::Kind: EndpointKind<RequestData = ()>,
    {
        UploadBare::upload(self, client, &()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds;
    use http::Method;
    use serde::Deserialize;

    #[derive(Serialize)]
    struct Person {
        name: String,
        age: u8,
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Saved {
        id: u64,
    }

    impl DataUploader for Person {
        type Kind = kinds::Upload<Person>;
        type Response = Saved;

        fn endpoint(&self) -> Endpoint<Self::Kind, Self::Response> {
            Endpoint::new("http://h/people").expect("static URL is valid")
        }
    }

    #[test]
    fn uploader_endpoint_builds_an_authenticated_post() {
        let person = Person {
            name: "Tom".to_string(),
            age: 20,
        };
        let token = "abcde".to_string();

        let draft = person
            .endpoint()
            .make_request(Some(&person), &token)
            .unwrap();

        assert_eq!(draft.method, Method::POST);
        assert_eq!(draft.headers.get("authorization").unwrap(), "Bearer abcde");
        assert_eq!(
            draft.body.as_deref().unwrap(),
            br#"{"name":"Tom","age":20}"#
        );
    }
}
