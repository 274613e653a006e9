//! # TurboMail SDK
//!
//! Rust SDK for the Mailgun email delivery API supporting:
//! - The messages endpoint with attachment and inline-image uploads
//! - The events endpoint
//! - Basic authentication as the fixed `api` user
//! - An injectable HTTP transport for testing and alternative backends
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use turbomail::{AttachedFiles, Client, ParamList};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("key-...");
//!
//!     let response = client.messages()
//!         .send(
//!             "mail.example.com",
//!             ParamList::new()
//!                 .add("from", "Sender <sender@mail.example.com>")
//!                 .add("to", "recipient@example.com")
//!                 .add("subject", "Hello")
//!                 .add("text", "Sent from Rust"),
//!             AttachedFiles::new(),
//!         )
//!         .await?;
//!
//!     println!("queued with status {}", response.status_code());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use client::{Client, ClientBuilder, Payload};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use crate::http::{
    HttpTransport, ReqwestTransport, TransportError, TransportRequest, TransportResponse,
};
pub use multipart::{AttachedFiles, FilePart, FileSource};
pub use params::ParamList;
pub use response::{ApiResponse, ResponseBody};

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod params;
pub mod resources;
pub mod response;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;
pub use serde_json::Value as JsonValue;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use turbomail::prelude::*;
/// ```
pub mod prelude {

    pub use crate::{
        ApiResponse, AttachedFiles, Client, ClientConfig, Error, FileSource, ParamList,
        ResponseBody, Result,
    };
}

/// SDK version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API host
pub const DEFAULT_API_HOST: &str = "api.mailgun.net";

/// Default API version segment of the base URL
pub const DEFAULT_API_VERSION: &str = "v3";

/// Fixed Basic-auth username paired with the API key
pub const AUTH_USER: &str = "api";

/// `User-Agent` value sent with every request
pub const USER_AGENT: &str = concat!("turbomail-rust/", env!("CARGO_PKG_VERSION"));
