//! DM1881 Core Library
//!
//! Transport-free building blocks of the 1881 search API client:
//! - Configuration resolution and the environment table
//! - Endpoints, query arguments and argument validation
//! - Signed authentication tokens
//! - The search result wrapper

pub mod config;
pub mod error;
pub mod query;
pub mod result;
pub mod token;

// Re-export commonly used types
pub use config::{ConfigOverrides, Configuration, Environment};
pub use error::{ConfigError, ResultParseError, TokenError, ValidationError};
pub use query::{Endpoint, QueryArguments};
pub use result::SearchResult;
