use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::query::Endpoint;

/// Search API base URLs by environment
pub const ENVIRONMENTS: [(Environment, &str); 3] = [
    (Environment::Dev, "https://api-dev.1881.no/search/"),
    (Environment::Stage, "https://api-test.1881.no/search/"),
    (Environment::Prod, "https://api.1881.no/search/"),
];

/// Deployment environment of the 1881 API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Stage,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Stage => "stage",
            Environment::Prod => "prod",
        }
    }

    /// Fixed base URL for this environment, without the version segment
    pub fn base_uri(&self) -> &'static str {
        ENVIRONMENTS
            .iter()
            .find(|(env, _)| env == self)
            .map(|(_, uri)| *uri)
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "stage" => Ok(Environment::Stage),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_version() -> String {
    "v1".to_string()
}

fn default_issuer_id() -> String {
    "VK1881Issuer".to_string()
}

fn default_audience_id() -> String {
    "VK1881Services".to_string()
}

/// User supplied settings. Anything left as `None` falls back to the default
/// when resolved into a [`Configuration`].
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub environment: Option<String>,
    pub version: Option<String>,
    pub issuer_id: Option<String>,
    pub audience_id: Option<String>,
    /// Auto-resolved from `environment` when empty
    pub base_uri: Option<String>,
    pub client_id: Option<String>,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub secret: Option<String>,
    pub debug: Option<bool>,
    /// HMAC algorithm used to sign tokens (HS256 unless set)
    pub algorithm: Option<Algorithm>,
    /// Disable TLS certificate verification. Defaults to `true` for every
    /// environment except prod, where the staging hosts use self-signed
    /// certificates.
    pub insecure_skip_verify: Option<bool>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let overrides: ConfigOverrides = serde_json::from_str(&contents)?;
        Ok(overrides)
    }

    /// Layer `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: ConfigOverrides) -> Self {
        Self {
            environment: other.environment.or(self.environment),
            version: other.version.or(self.version),
            issuer_id: other.issuer_id.or(self.issuer_id),
            audience_id: other.audience_id.or(self.audience_id),
            base_uri: other.base_uri.or(self.base_uri),
            client_id: other.client_id.or(self.client_id),
            username: other.username.or(self.username),
            secret: other.secret.or(self.secret),
            debug: other.debug.or(self.debug),
            algorithm: other.algorithm.or(self.algorithm),
            insecure_skip_verify: other.insecure_skip_verify.or(self.insecure_skip_verify),
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = Some(skip);
        self
    }
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("environment", &self.environment)
            .field("version", &self.version)
            .field("issuer_id", &self.issuer_id)
            .field("audience_id", &self.audience_id)
            .field("base_uri", &self.base_uri)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("debug", &self.debug)
            .field("algorithm", &self.algorithm)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .finish()
    }
}

/// Resolved client configuration. Immutable once built.
#[derive(Clone)]
pub struct Configuration {
    environment: Environment,
    version: String,
    issuer_id: String,
    audience_id: String,
    base_uri: String,
    client_id: String,
    username: String,
    secret: String,
    debug: bool,
    algorithm: Algorithm,
    insecure_skip_verify: bool,
}

impl Configuration {
    /// Merge `overrides` onto the defaults and validate the result.
    ///
    /// The base URL is looked up from [`ENVIRONMENTS`] when not supplied, every
    /// string setting must be non-empty, and the version segment is appended to
    /// the base URL last.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let ConfigOverrides {
            environment,
            version,
            issuer_id,
            audience_id,
            base_uri,
            client_id,
            username,
            secret,
            debug,
            algorithm,
            insecure_skip_verify,
        } = overrides;

        let environment = environment.unwrap_or_else(default_environment);
        if environment.is_empty() {
            return Err(ConfigError::MissingField("environment"));
        }
        let environment: Environment = environment.parse()?;

        let mut base_uri = base_uri.unwrap_or_default();
        if base_uri.is_empty() {
            base_uri = environment.base_uri().to_string();
        }

        let version = version.unwrap_or_else(default_version);
        let issuer_id = issuer_id.unwrap_or_else(default_issuer_id);
        let audience_id = audience_id.unwrap_or_else(default_audience_id);
        let client_id = client_id.unwrap_or_default();
        let username = username.unwrap_or_default();
        let secret = secret.unwrap_or_default();

        let required: [(&'static str, &str); 7] = [
            ("version", &version),
            ("issuer_id", &issuer_id),
            ("audience_id", &audience_id),
            ("base_uri", &base_uri),
            ("client_id", &client_id),
            ("username", &username),
            ("secret", &secret),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(ConfigError::MissingField(*field));
        }

        let algorithm = algorithm.unwrap_or(Algorithm::HS256);
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(ConfigError::UnsupportedAlgorithm(algorithm));
        }

        let insecure_skip_verify = insecure_skip_verify.unwrap_or(environment != Environment::Prod);
        if insecure_skip_verify {
            tracing::warn!(
                environment = %environment,
                "TLS certificate verification is disabled for this client"
            );
        }

        if !base_uri.ends_with('/') {
            base_uri.push('/');
        }
        base_uri.push_str(&version);
        base_uri.push('/');

        tracing::debug!(environment = %environment, base_uri = %base_uri, "Configuration resolved");

        Ok(Self {
            environment,
            version,
            issuer_id,
            audience_id,
            base_uri,
            client_id,
            username,
            secret,
            debug: debug.unwrap_or(false),
            algorithm,
            insecure_skip_verify,
        })
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn issuer_id(&self) -> &str {
        &self.issuer_id
    }

    pub fn audience_id(&self) -> &str {
        &self.audience_id
    }

    /// URL prefix for every request, version segment included
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn insecure_skip_verify(&self) -> bool {
        self.insecure_skip_verify
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_uri, endpoint.path())
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("environment", &self.environment)
            .field("version", &self.version)
            .field("issuer_id", &self.issuer_id)
            .field("audience_id", &self.audience_id)
            .field("base_uri", &self.base_uri)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .field("debug", &self.debug)
            .field("algorithm", &self.algorithm)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> ConfigOverrides {
        ConfigOverrides::new()
            .with_client_id("client")
            .with_username("user@example.com")
            .with_secret("s3cret")
    }

    #[test]
    fn test_defaults_resolve_to_dev() {
        let config = Configuration::resolve(credentials()).unwrap();

        assert_eq!(config.environment(), Environment::Dev);
        assert_eq!(config.version(), "v1");
        assert_eq!(config.issuer_id(), "VK1881Issuer");
        assert_eq!(config.audience_id(), "VK1881Services");
        assert_eq!(config.base_uri(), "https://api-dev.1881.no/search/v1/");
        assert!(!config.debug());
        assert_eq!(config.algorithm(), Algorithm::HS256);
    }

    #[test]
    fn test_environment_table() {
        for (env, expected) in [
            ("dev", "https://api-dev.1881.no/search/v1/"),
            ("stage", "https://api-test.1881.no/search/v1/"),
            ("prod", "https://api.1881.no/search/v1/"),
        ] {
            let config =
                Configuration::resolve(credentials().with_environment(env).with_base_uri(""))
                    .unwrap();
            assert_eq!(config.base_uri(), expected);
        }
    }

    #[test]
    fn test_missing_fields_are_named() {
        let cases: [(&str, ConfigOverrides); 6] = [
            ("client_id", credentials().with_client_id("")),
            ("username", ConfigOverrides::new().with_client_id("c").with_secret("s")),
            ("secret", credentials().with_secret("")),
            ("version", credentials().with_version("")),
            ("issuer_id", ConfigOverrides { issuer_id: Some(String::new()), ..credentials() }),
            ("environment", credentials().with_environment("")),
        ];

        for (expected, overrides) in cases {
            match Configuration::resolve(overrides) {
                Err(ConfigError::MissingField(field)) => assert_eq!(field, expected),
                other => panic!("expected MissingField({expected}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_explicit_false_is_not_missing() {
        let config = Configuration::resolve(
            credentials()
                .with_debug(false)
                .with_insecure_skip_verify(false),
        )
        .unwrap();
        assert!(!config.debug());
        assert!(!config.insecure_skip_verify());
    }

    #[test]
    fn test_unknown_environment() {
        let err = Configuration::resolve(credentials().with_environment("qa")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment(name) if name == "qa"));

        let err = Configuration::resolve(
            credentials()
                .with_environment("qa")
                .with_base_uri("http://localhost/"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment(name) if name == "qa"));
    }

    #[test]
    fn test_explicit_base_uri_gets_version() {
        let config = Configuration::resolve(
            credentials()
                .with_base_uri("http://localhost:8080/search/")
                .with_version("v2"),
        )
        .unwrap();
        assert_eq!(config.base_uri(), "http://localhost:8080/search/v2/");

        let config =
            Configuration::resolve(credentials().with_base_uri("http://localhost:8080/search"))
                .unwrap();
        assert_eq!(config.base_uri(), "http://localhost:8080/search/v1/");
    }

    #[test]
    fn test_tls_verification_follows_environment_unless_set() {
        let dev = Configuration::resolve(credentials()).unwrap();
        assert!(dev.insecure_skip_verify());

        let prod = Configuration::resolve(credentials().with_environment("prod")).unwrap();
        assert!(!prod.insecure_skip_verify());

        let strict_dev =
            Configuration::resolve(credentials().with_insecure_skip_verify(false)).unwrap();
        assert!(!strict_dev.insecure_skip_verify());
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let err = Configuration::resolve(credentials().with_algorithm(Algorithm::RS256))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedAlgorithm(Algorithm::RS256)));

        let config =
            Configuration::resolve(credentials().with_algorithm(Algorithm::HS512)).unwrap();
        assert_eq!(config.algorithm(), Algorithm::HS512);
    }

    #[test]
    fn test_endpoint_url() {
        let config = Configuration::resolve(credentials().with_environment("prod")).unwrap();
        assert_eq!(
            config.endpoint_url(Endpoint::InfoSortBy),
            "https://api.1881.no/search/v1/info/sortby"
        );
    }

    #[test]
    fn test_merge_prefers_later_values() {
        let file = ConfigOverrides::new()
            .with_environment("stage")
            .with_username("file-user");
        let cli = ConfigOverrides::new().with_username("cli-user");

        let merged = file.merge(cli);
        assert_eq!(merged.environment.as_deref(), Some("stage"));
        assert_eq!(merged.username.as_deref(), Some("cli-user"));
    }

    #[test]
    fn test_load_from_json() {
        let path = std::env::temp_dir().join(format!("dm1881-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"environment": "prod", "client_id": "c", "username": "u", "secret": "s", "algorithm": "HS384"}"#,
        )
        .unwrap();

        let overrides = ConfigOverrides::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let config = Configuration::resolve(overrides).unwrap();
        assert_eq!(config.environment(), Environment::Prod);
        assert_eq!(config.algorithm(), Algorithm::HS384);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigOverrides::load("/nonexistent/dm1881.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_debug_output_hides_secret() {
        let config = Configuration::resolve(credentials()).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("[REDACTED]"));

        let printed = format!("{:?}", credentials());
        assert!(!printed.contains("s3cret"));
    }
}
