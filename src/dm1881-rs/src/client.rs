use crate::{RequestError, Result};
use chrono::Utc;
use dm1881_core::{
    query, token, ConfigOverrides, Configuration, Endpoint, QueryArguments, SearchResult,
};
use reqwest::header::AUTHORIZATION;
use reqwest::Client as HttpClient;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, instrument, trace};

/// Header carrying the API client identifier
pub const CLIENT_HEADER: &str = "X-VK1881-API-CLIENT";

/// 1881 search API client
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<Configuration>,
    client: HttpClient,
}

/// Every metadata list the API offers, fetched together by [`Client::meta`]
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    #[serde(rename = "Filter")]
    pub filter: SearchResult,
    #[serde(rename = "SortBy")]
    pub sort_by: SearchResult,
    #[serde(rename = "Facet")]
    pub facet: SearchResult,
}

impl Client {
    /// Create a client for a resolved configuration.
    ///
    /// Certificate verification is switched off when the configuration says
    /// `insecure_skip_verify` (the default outside prod).
    pub fn new(config: Configuration) -> Result<Self> {
        let client = HttpClient::builder()
            .danger_accept_invalid_certs(config.insecure_skip_verify())
            .connection_verbose(config.debug())
            .build()?;

        Ok(Self::with_http_client(config, client))
    }

    /// Resolve `overrides` and create a client from the result
    pub fn from_overrides(overrides: ConfigOverrides) -> Result<Self> {
        Self::new(Configuration::resolve(overrides)?)
    }

    /// Use a caller-built HTTP client (timeouts, proxies, TLS roots).
    /// `insecure_skip_verify` and `debug` are not applied to it.
    pub fn with_http_client(config: Configuration, client: HttpClient) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Search persons and companies
    pub async fn search(&self, query: &str, args: QueryArguments) -> Result<SearchResult> {
        self.search_endpoint(Endpoint::Unit, Some(query), args).await
    }

    /// Search persons
    pub async fn search_person(&self, query: &str, args: QueryArguments) -> Result<SearchResult> {
        self.search_endpoint(Endpoint::Person, Some(query), args).await
    }

    /// Search companies
    pub async fn search_company(&self, query: &str, args: QueryArguments) -> Result<SearchResult> {
        self.search_endpoint(Endpoint::Company, Some(query), args).await
    }

    /// Search by phone number. Only the digits of `number` are sent.
    pub async fn search_phone(&self, number: &str, args: QueryArguments) -> Result<SearchResult> {
        self.search_endpoint(Endpoint::PhoneNumber, Some(number), args).await
    }

    /// Filters that can be used on a search
    pub async fn meta_filters(&self) -> Result<SearchResult> {
        self.request(Endpoint::InfoFilter, &QueryArguments::new()).await
    }

    /// Sort orders that can be used on a search
    pub async fn meta_sorters(&self) -> Result<SearchResult> {
        self.request(Endpoint::InfoSortBy, &QueryArguments::new()).await
    }

    /// Facets that can be used on a search
    pub async fn meta_facets(&self) -> Result<SearchResult> {
        self.request(Endpoint::InfoFacet, &QueryArguments::new()).await
    }

    /// Fetch filters, sorters and facets in one go
    pub async fn meta(&self) -> Result<Metadata> {
        Ok(Metadata {
            filter: self.meta_filters().await?,
            sort_by: self.meta_sorters().await?,
            facet: self.meta_facets().await?,
        })
    }

    /// Validate the arguments for `endpoint` and perform the search.
    ///
    /// Nothing is sent when validation fails.
    pub async fn search_endpoint(
        &self,
        endpoint: Endpoint,
        query: Option<&str>,
        args: QueryArguments,
    ) -> Result<SearchResult> {
        let args = query::assemble(endpoint, query, args)?;
        self.request(endpoint, &args).await
    }

    #[instrument(skip_all, fields(endpoint = %endpoint))]
    async fn request(&self, endpoint: Endpoint, args: &QueryArguments) -> Result<SearchResult> {
        let url = self.config.endpoint_url(endpoint);
        let token = token::sign(&self.config, Utc::now())?;

        debug!(url = %url, arguments = args.len(), "Sending search request");

        let mut request = self
            .client
            .get(&url)
            .header(CLIENT_HEADER, self.config.client_id())
            .header(AUTHORIZATION, format!("JWT {token}"));
        if !args.is_empty() {
            request = request.query(args.as_pairs());
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Network error during search request");
            RequestError::Transport(e)
        })?;

        let status = response.status();
        debug!(status = %status, "Received response");

        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_else(|e| {
                error!(error = %e, "Failed to read error response body");
                String::new()
            });
            error!(status = status.as_u16(), body = %body, "Search API error");
            return Err(RequestError::Status {
                status: status.as_u16(),
                headers,
                body,
            }
            .into());
        }

        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            RequestError::Transport(e)
        })?;

        if self.config.debug() {
            trace!(body = %String::from_utf8_lossy(&body), "Response body");
        }

        let result = SearchResult::from_slice(&body).map_err(|e| {
            error!(error = %e, "Failed to parse search response");
            e
        })?;

        debug!(
            hits = result.count(),
            query_time_ms = result.query_time(),
            profile = result.profile(),
            "Search completed"
        );

        Ok(result)
    }
}
