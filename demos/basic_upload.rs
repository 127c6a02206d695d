//! Basic example demonstrating endpoint execution and self-uploading objects.
//!
//! This example shows how to:
//! - Create a client
//! - Fetch data through a public endpoint
//! - Let a value upload itself to its own endpoint
//!
//! Run with: `cargo run --example basic_upload`

use courier::{kinds, Client, DataUploader, Endpoint, Error, UploadWithResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

// NewPost knows where it belongs: an unauthenticated JSON POST whose
// response decodes into the created Post.
impl DataUploader for NewPost {
    type Kind = kinds::PublicUpload<NewPost>;
    type Response = Post;

    fn endpoint(&self) -> Endpoint<Self::Kind, Self::Response> {
        Endpoint::new("https://jsonplaceholder.typicode.com/posts")
            .expect("static URL is valid")
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("courier=debug,basic_upload=info")
        .init();

    let client = Client::builder().user_agent("courier-demo/0.1")?.build()?;

    // Fetch a post through a public read endpoint.
    let first: Endpoint<kinds::Public, Post> =
        Endpoint::new("https://jsonplaceholder.typicode.com/posts/1")?;
    let post = client.execute(&first, None, &()).await?;
    println!("Fetched post {}: {}", post.id, post.title);

    // Create a post by letting the value deliver itself.
    let draft = NewPost {
        title: "Hello from courier".to_string(),
        body: "A post that uploaded itself.".to_string(),
        user_id: 1,
    };
    let created = draft.upload_unauthenticated(&client).await?;
    println!("Created post with ID: {}", created.id);

    Ok(())
}
