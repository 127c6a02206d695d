//! Example demonstrating comprehensive error handling.
//!
//! This example shows how to:
//! - Handle each error kind the request pipeline can produce
//! - Access raw response data on decode failures
//! - Inspect HTTP status codes preserved in errors
//!
//! Run with: `cargo run --example error_handling`

use courier::{kinds, Client, Endpoint, Error};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    id: u32,
    title: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct WrongShape {
    id: String,
    headline: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("courier=info")
        .init();

    let client = Client::new()?;

    println!("=== Example 1: Unexpected status codes ===");
    // A resource that does not exist (404).
    let missing: Endpoint<kinds::Public, Post> =
        Endpoint::new("https://jsonplaceholder.typicode.com/posts/999999")?;
    match client.execute(&missing, None, &()).await {
        Ok(post) => println!("Success: {post:?}"),
        Err(Error::UnexpectedStatus { status }) => {
            println!("Server answered {status}; the body was never decoded");
        }
        Err(e) => println!("Other error: {e}"),
    }

    println!("\n=== Example 2: Decode failures keep the raw body ===");
    // The response is valid JSON, just not the shape WrongShape expects.
    let mismatched: Endpoint<kinds::Public, WrongShape> =
        Endpoint::new("https://jsonplaceholder.typicode.com/posts/1")?;
    match client.execute(&mismatched, None, &()).await {
        Ok(value) => println!("Success: {value:?}"),
        Err(Error::InvalidData {
            raw_response,
            serde_error,
        }) => {
            println!("Failed to decode: {serde_error}");
            let preview: String = raw_response.chars().take(80).collect();
            println!("Raw response (first 80 chars): {preview}");
        }
        Err(e) => println!("Other error: {e}"),
    }

    println!("\n=== Example 3: Inspecting errors generically ===");
    match client.execute(&missing, None, &()).await {
        Ok(_) => println!("Success"),
        Err(e) => {
            println!("Error: {e}");
            if let Some(status) = e.status() {
                println!("  Carried status: {status}");
            }
            println!("  Rejected credentials: {}", e.is_auth_error());
            // Retrying is always the caller's move: the same call can
            // simply be issued again.
        }
    }

    Ok(())
}
