//! HTTP transport for the account API
//!
//! Sends validated accounts to the remote service and decodes the accounts
//! it returns. This is a thin collaborator around `reqwest`: it checks
//! identifiers before any I/O, maps every non-expected status to
//! [`TransportError::UnexpectedStatus`], and never touches the validation
//! engine. Decoded responses are trusted.
//!
//! Requests are logged at `debug`, unexpected statuses at `warn`.

use crate::io::wire_format::{account_data, account_from, AccountData, Envelope};
use crate::types::{Account, TransportError};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

/// Media type used for request and response bodies
pub const API_MEDIA_TYPE: &str = "application/vnd.api+json";

pub const DEFAULT_API_HOST: &str = "http://localhost:8080";
pub const DEFAULT_API_ENDPOINT: &str = "/v1/organisation/accounts";
pub const HEALTH_ENDPOINT: &str = "/v1/health";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and authority of the service, e.g. `http://localhost:8080`
    pub api_host: String,
    /// Path of the accounts collection, resolved against `api_host`
    pub api_endpoint: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config, falling back to the default timeout for zero
    pub fn new(api_host: impl Into<String>, api_endpoint: impl Into<String>, timeout: Duration) -> Self {
        let timeout = if timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            timeout
        };

        ClientConfig {
            api_host: api_host.into(),
            api_endpoint: api_endpoint.into(),
            timeout,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::new(DEFAULT_API_HOST, DEFAULT_API_ENDPOINT, DEFAULT_TIMEOUT)
    }
}

/// Page selector for list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    First,
    Last,
    Number(u32),
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNumber::First => f.write_str("first"),
            PageNumber::Last => f.write_str("last"),
            PageNumber::Number(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for PageNumber {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "first" => Ok(PageNumber::First),
            "last" => Ok(PageNumber::Last),
            other => other.parse::<u32>().map(PageNumber::Number).map_err(|_| {
                format!(
                    "page must be 'first', 'last' or a page number, got '{}'",
                    other
                )
            }),
        }
    }
}

/// Pagination settings for [`HttpClient::list`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: PageNumber,
    pub size: u32,
}

impl Pagination {
    pub fn new(page: PageNumber, size: u32) -> Self {
        Pagination { page, size }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page[number]", self.page.to_string()),
            ("page[size]", self.size.to_string()),
        ]
    }
}

/// Client for the accounts collection of the remote service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    api_host: Url,
    api_endpoint: String,
}

impl HttpClient {
    /// Create a client from `config`
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidUrl` if the host cannot be parsed or
    /// the endpoint cannot be resolved against it, and `TransportError::Http`
    /// if the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let api_host = Url::parse(&config.api_host)?;
        api_host.join(&config.api_endpoint)?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(HttpClient {
            client,
            api_host,
            api_endpoint: config.api_endpoint.clone(),
        })
    }

    /// Create `account` on the server
    ///
    /// Returns the account as stored by the server (with timestamps).
    /// Expects `201 Created`.
    pub async fn create(&self, account: &Account) -> Result<Account, TransportError> {
        let url = self.resource_url(None, &[])?;
        let body = serde_json::to_vec(&Envelope::new(account_data(account)))?;

        let request = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, API_MEDIA_TYPE)
            .body(body);
        let envelope: Envelope<AccountData> =
            self.execute(request, StatusCode::CREATED).await?;

        Ok(account_from(envelope.data))
    }

    /// Fetch a single account by ID. Expects `200 OK`.
    pub async fn fetch(&self, account_id: &str) -> Result<Account, TransportError> {
        let id = parse_identifier(account_id)?;
        let url = self.resource_url(Some(id), &[])?;

        let envelope: Envelope<AccountData> = self
            .execute(self.request(Method::GET, url), StatusCode::OK)
            .await?;

        Ok(account_from(envelope.data))
    }

    /// List accounts, optionally one page at a time. Expects `200 OK`.
    pub async fn list(&self, pagination: Option<&Pagination>) -> Result<Vec<Account>, TransportError> {
        let query = pagination.map(Pagination::query).unwrap_or_default();
        let url = self.resource_url(None, &query)?;

        let envelope: Envelope<Vec<AccountData>> = self
            .execute(self.request(Method::GET, url), StatusCode::OK)
            .await?;

        Ok(envelope.data.into_iter().map(account_from).collect())
    }

    /// Delete version `version` of an account. Expects `204 No Content`.
    pub async fn delete(&self, account_id: &str, version: u64) -> Result<(), TransportError> {
        let id = parse_identifier(account_id)?;
        let url = self.resource_url(Some(id), &[("version", version.to_string())])?;

        let response = self.request(Method::DELETE, url).send().await?;
        check_status(response.status(), StatusCode::NO_CONTENT, response).await?;
        Ok(())
    }

    /// Whether the service health endpoint answers `200 OK`
    ///
    /// Any failure, including network errors, counts as unhealthy.
    pub async fn is_healthy(&self) -> bool {
        let url = match self.api_host.join(HEALTH_ENDPOINT) {
            Ok(url) => url,
            Err(_) => return false,
        };

        match self.request(Method::GET, url).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }

    /// Resolve the collection (or one resource) URL with query parameters
    fn resource_url(
        &self,
        id: Option<Uuid>,
        query: &[(&str, String)],
    ) -> Result<Url, TransportError> {
        let mut path = self.api_endpoint.trim_end_matches('/').to_string();
        if let Some(id) = id {
            path = format!("{}/{}", path, id);
        }

        let mut url = self.api_host.join(&path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "sending account API request");
        self.client
            .request(method, url)
            .header(ACCEPT, API_MEDIA_TYPE)
    }

    /// Send `request`, check the status and decode the JSON body
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> Result<T, TransportError> {
        let response = request.send().await?;
        let body = check_status(response.status(), expected, response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Read the body and fail unless `status` is `expected`
async fn check_status(
    status: StatusCode,
    expected: StatusCode,
    response: reqwest::Response,
) -> Result<String, TransportError> {
    let body = response.text().await?;
    if status != expected {
        tracing::warn!(
            status = status.as_u16(),
            expected = expected.as_u16(),
            "unexpected account API response"
        );
        return Err(TransportError::unexpected_status(status.as_u16(), body));
    }
    Ok(body)
}

fn parse_identifier(id: &str) -> Result<Uuid, TransportError> {
    Uuid::parse_str(id).map_err(|_| TransportError::invalid_identifier(id))
}
