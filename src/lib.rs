//! # Courier - typed REST endpoints and self-uploading data objects
//!
//! Courier is a statically-typed abstraction for describing REST resources
//! and issuing HTTP requests against them, built on top of `reqwest`. An
//! [`Endpoint`] couples a URL with a preparation strategy (auth scheme, HTTP
//! method, body encoding) and the expected response type; a [`DataUploader`]
//! is a serializable object that knows its own endpoint and can send itself.
//!
//! ## Quick Start
//!
//! ```no_run
//! use courier::{kinds, Client, DataUploader, Endpoint, UploadWithResponse};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct NewArticle {
//!     title: String,
//!     body: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct Article {
//!     id: u64,
//!     title: String,
//!     body: String,
//! }
//!
//! // NewArticle can deliver itself: a bearer-authenticated POST whose
//! // response decodes into Article.
//! impl DataUploader for NewArticle {
//!     type Kind = kinds::Upload<NewArticle>;
//!     type Response = Article;
//!
//!     fn endpoint(&self) -> Endpoint<Self::Kind, Self::Response> {
//!         Endpoint::new("https://api.example.com/articles")
//!             .expect("static URL is valid")
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), courier::Error> {
//!     let client = Client::new()?;
//!
//!     // Send a value to its own endpoint.
//!     let token = "secret-token".to_string();
//!     let draft = NewArticle {
//!         title: "Hello".to_string(),
//!         body: "World".to_string(),
//!     };
//!     let created = draft.upload(&client, &token).await?;
//!     println!("Created article {}", created.id);
//!
//!     // Or describe an endpoint and execute it directly.
//!     let latest: Endpoint<kinds::Public, Article> =
//!         Endpoint::new("https://api.example.com/articles/latest")?;
//!     let article = client.execute(&latest, None, &()).await?;
//!     println!("Latest: {}", article.title);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed endpoints** - an `Endpoint<Kind, Response>` fixes the auxiliary
//!   data, request body, and response types at compile time
//! - **Composable strategies** - the [`kinds`] module covers public reads,
//!   Basic and Bearer auth, and JSON uploads; `Edit`/`Delete` reuse the
//!   upload strategy and override only the method
//! - **Self-uploading objects** - implement [`DataUploader`] and a value can
//!   send itself, with the right `upload` shape chosen at compile time
//! - **One error taxonomy** - every failure is a [`Error`] variant; the
//!   status contract (2xx success, 401/403 permission or login errors,
//!   everything else with its literal code) is enforced before any body is
//!   read
//! - **Escape hatch** - a per-endpoint customization hook may rewrite the
//!   prepared request verbatim
//! - **Structured logging** - request dispatch and response arrival are
//!   logged with `tracing`
//!
//! ## Error Handling
//!
//! ```no_run
//! use courier::{kinds, Client, Endpoint, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new()?;
//! let endpoint: Endpoint<kinds::Public, serde_json::Value> =
//!     Endpoint::new("https://api.example.com/status")?;
//!
//! match client.execute(&endpoint, None, &()).await {
//!     Ok(value) => println!("Success: {value:?}"),
//!     Err(Error::PermissionDenied { status }) => {
//!         eprintln!("Denied with {status}; acquire fresh credentials and call again");
//!     }
//!     Err(Error::InvalidData { raw_response, serde_error }) => {
//!         eprintln!("Failed to decode: {serde_error}");
//!         eprintln!("  Raw response: {raw_response}");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! No error is retried anywhere in this crate. Preparation is deterministic,
//! so a caller (a UI retry button, a job runner) retries by simply invoking
//! the same call again.
//!
//! ## Concurrency
//!
//! Every `execute*` call is an independent future with no shared mutable
//! state; any number may run concurrently against the same [`Client`], which
//! only shares its transport connection pool. Cancellation is cooperative:
//! dropping a call's future aborts the in-flight network request and skips
//! decoding. Timeouts are transport configuration
//! ([`ClientBuilder::timeout`]) and surface as [`Error::Transport`].

mod client;
mod draft;
mod encoding;
mod endpoint;
mod error;
pub mod kinds;
mod uploader;

pub use client::{Client, ClientBuilder};
pub use draft::{CachePolicy, RequestDraft};
pub use encoding::EncodingOptions;
pub use endpoint::Endpoint;
pub use error::{validate_status, Error, Result};
pub use kinds::{BasicAccessToken, Empty, EndpointKind};
pub use uploader::{
    DataUploader, UploadBare, UploadWithResponse, UploadWithoutBody, UploadWithoutResponse,
};
