//! Error types shared by the resolver, the argument validator and the
//! result wrapper.

/// Missing or invalid client setup. Raised while resolving a [`Configuration`].
///
/// [`Configuration`]: crate::config::Configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    MissingField(&'static str),

    #[error("Unknown environment: {0} (expected dev, stage or prod)")]
    UnknownEnvironment(String),

    #[error("Unsupported signing algorithm {0:?}, only HS256, HS384 and HS512 are accepted")]
    UnsupportedAlgorithm(jsonwebtoken::Algorithm),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The caller asked for something the API does not accept.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid argument: {0}")]
    UnknownArgument(String),

    #[error("Phone number contains no digits: {0:?}")]
    InvalidPhoneNumber(String),
}

/// The upstream response did not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum ResultParseError {
    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Response is not a JSON object")]
    NotAnObject,

    #[error("Response is missing field {0}")]
    MissingField(&'static str),

    #[error("Response field {field} is not {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to sign authentication token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}
