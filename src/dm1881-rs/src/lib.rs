//! DM1881 Client Library
//!
//! HTTP client for the 1881 person, company and phone number search API.
//!
//! ```rust,no_run
//! use dm1881_rs::{Client, ConfigOverrides, QueryArguments};
//!
//! #[tokio::main]
//! async fn main() -> dm1881_rs::Result<()> {
//!     let client = Client::from_overrides(
//!         ConfigOverrides::new()
//!             .with_environment("prod")
//!             .with_client_id("my-client")
//!             .with_username("me@example.com")
//!             .with_secret("secret"),
//!     )?;
//!
//!     let result = client.search("acme", QueryArguments::new().rows(10)).await?;
//!     println!("{} hits in {} ms", result.count(), result.query_time());
//!     Ok(())
//! }
//! ```

mod client;

pub use client::{Client, Metadata, CLIENT_HEADER};
pub use dm1881_core::{
    ConfigError, ConfigOverrides, Configuration, Endpoint, Environment, QueryArguments,
    ResultParseError, SearchResult, TokenError, ValidationError,
};

use reqwest::header::HeaderMap;

/// Upstream HTTP failure. The original diagnostics are kept for inspection.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error: {status} - {body}")]
    Status {
        status: u16,
        headers: HeaderMap,
        body: String,
    },
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Transport(e) => e.status().map(|s| s.as_u16()),
            RequestError::Status { status, .. } => Some(*status),
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            RequestError::Transport(_) => None,
            RequestError::Status { body, .. } => Some(body),
        }
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            RequestError::Transport(_) => None,
            RequestError::Status { headers, .. } => Some(headers),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    ResultParse(#[from] ResultParseError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Request(RequestError::Transport(e))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
