//! HTTP client for registry and auth service communication.
//!
//! This module provides a thin blocking client built on reqwest. It knows the
//! three endpoints a scan needs: the token endpoint of the auth service, the
//! tag list of a repository and the manifest of a tag. Every call completes
//! before the next one is issued.

use crate::auth::{Credentials, TokenResponse, TokenScope};
use crate::config::Config;
use crate::error::{Result, ScoutError};
use crate::manifest::{MANIFEST_V2_MEDIA_TYPE, ManifestResult};
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;


/// Response from the tags list API endpoint.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    /// List of tag names
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// Where the registry and its auth service live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base registry URL (e.g., "https://registry.hub.docker.com")
    pub registry_url: String,
    /// Token endpoint of the auth service (e.g., "https://auth.docker.io/token")
    pub auth_url: String,
    /// Service name sent to the auth service (e.g., "registry.docker.io")
    pub auth_service: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Endpoints {
    fn from(config: &Config) -> Self {
        Self {
            registry_url: config.registry.url.clone(),
            auth_url: config.auth.url.clone(),
            auth_service: config.auth.service.clone(),
        }
    }
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libsigscout::client::ClientConfig;
///
/// let config = ClientConfig::new().with_timeout(60);
/// assert_eq!(config.timeout_seconds, 60);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Blocking HTTP client for registry operations.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http_client: ReqwestClient,
    endpoints: Endpoints,
    timeout_seconds: u64,
}

impl Client {
    /// Creates a new client for the given endpoints with default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsigscout::client::{Client, Endpoints};
    ///
    /// let client = Client::new(Endpoints::default()).unwrap();
    /// assert_eq!(client.registry_url(), "https://registry.hub.docker.com");
    /// ```
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        Self::with_config(endpoints, ClientConfig::default())
    }

    /// Creates a new client for the given endpoints with custom configuration.
    pub fn with_config(endpoints: Endpoints, config: ClientConfig) -> Result<Self> {
        let endpoints = Endpoints {
            registry_url: Self::normalize_url(&endpoints.registry_url)?,
            auth_url: Self::normalize_url(&endpoints.auth_url)?,
            auth_service: endpoints.auth_service,
        };

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("sigscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ScoutError::network_with_source(
                    &endpoints.registry_url,
                    "Failed to create HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http_client,
            endpoints,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Normalizes a URL by ensuring it has a scheme and removing trailing slashes.
    fn normalize_url(url: &str) -> Result<String> {
        let url = url.trim();

        if url.is_empty() {
            return Err(ScoutError::validation("URL cannot be empty"));
        }

        let url = if !url.starts_with("http://") && !url.starts_with("https://") {
            format!("https://{}", url)
        } else {
            url.to_string()
        };

        Ok(url.trim_end_matches('/').to_string())
    }

    /// Returns the base registry URL.
    pub fn registry_url(&self) -> &str {
        &self.endpoints.registry_url
    }

    /// Returns the token endpoint URL.
    pub fn auth_url(&self) -> &str {
        &self.endpoints.auth_url
    }

    /// Builds the token request URL for a scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsigscout::auth::TokenScope;
    /// use libsigscout::client::{Client, Endpoints};
    ///
    /// let client = Client::new(Endpoints::default()).unwrap();
    /// let url = client.token_url(&TokenScope::pull("library/ubuntu")).unwrap();
    /// assert_eq!(
    ///     url,
    ///     "https://auth.docker.io/token?service=registry.docker.io&scope=repository:library/ubuntu:pull"
    /// );
    /// ```
    pub fn token_url(&self, scope: &TokenScope) -> Result<String> {
        let mut url = Url::parse(&self.endpoints.auth_url).map_err(|e| {
            ScoutError::validation(format!(
                "Invalid auth URL '{}': {}",
                self.endpoints.auth_url, e
            ))
        })?;

        // Scope separators stay literal, the token service expects them unescaped
        url.set_query(Some(&format!(
            "service={}&scope={}",
            self.endpoints.auth_service, scope
        )));

        Ok(url.to_string())
    }

    /// Returns the tag list URL of a repository.
    pub fn tags_url(&self, repository: &str) -> String {
        format!("{}/v2/{}/tags/list", self.endpoints.registry_url, repository)
    }

    /// Returns the manifest URL of a tag.
    pub fn manifest_url(&self, repository: &str, tag: &str) -> String {
        format!(
            "{}/v2/{}/manifests/{}",
            self.endpoints.registry_url, repository, tag
        )
    }

    /// Requests a bearer token for `scope` from the auth service.
    ///
    /// # Errors
    ///
    /// Returns an error if the auth service is unreachable, answers with a
    /// status other than 200, returns a body that is not JSON, or returns JSON
    /// without a `token`.
    pub fn fetch_token(&self, scope: &TokenScope) -> Result<Credentials> {
        let url = self.token_url(scope)?;
        let (response, _) = self.get_json::<TokenResponse>(self.http_client.get(&url), &url)?;
        response.into_credentials(&url)
    }

    /// Fetches the list of tags for a repository, in registry order.
    ///
    /// Only the first page is requested; `Link` pagination is not followed.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is unreachable, answers with a status
    /// other than 200, or returns a body without a `tags` array.
    pub fn fetch_tags(&self, repository: &str, credentials: &Credentials) -> Result<Vec<String>> {
        let url = self.tags_url(repository);
        let request = Self::authorize(self.http_client.get(&url), credentials);

        let (response, _) = self.get_json::<TagsResponse>(request, &url)?;
        response
            .tags
            .ok_or_else(|| ScoutError::missing_field(&url, "tags"))
    }

    /// Fetches the v2 manifest of a tag together with the response headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is unreachable, answers with a status
    /// other than 200, or returns a body that is not JSON.
    pub fn fetch_manifest(
        &self,
        repository: &str,
        tag: &str,
        credentials: &Credentials,
    ) -> Result<ManifestResult> {
        let url = self.manifest_url(repository, tag);
        let request = Self::authorize(self.http_client.get(&url), credentials)
            .header(ACCEPT, MANIFEST_V2_MEDIA_TYPE);

        let (body, headers) = self.get_json::<serde_json::Value>(request, &url)?;
        Ok(ManifestResult::new(tag, body, headers))
    }

    fn authorize(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        match credentials.to_header_value() {
            Some(value) => request.header(AUTHORIZATION, value),
            None => request,
        }
    }

    /// Sends a request and decodes a 200 response as JSON.
    fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<(T, HeaderMap)> {
        let response = request
            .send()
            .map_err(|e| self.translate_reqwest_error(e, url))?;

        let response = Self::check_response_status(response, url)?;
        let headers = response.headers().clone();

        let text = response.text().map_err(|e| {
            ScoutError::network_with_source(url, "Failed to read response body", e)
        })?;

        let value = serde_json::from_str(&text).map_err(|e| ScoutError::Decode {
            url: url.to_string(),
            source: e,
        })?;

        Ok((value, headers))
    }

    /// Translates a reqwest error into a ScoutError.
    fn translate_reqwest_error(&self, error: reqwest::Error, url: &str) -> ScoutError {
        if error.is_timeout() {
            ScoutError::network(
                url,
                format!("Request timed out after {} seconds", self.timeout_seconds),
            )
        } else if error.is_connect() {
            ScoutError::network_with_source(url, "Failed to connect", error)
        } else if error.is_request() {
            ScoutError::network_with_source(url, "Failed to send request", error)
        } else {
            ScoutError::network_with_source(url, "Unknown error occurred", error)
        }
    }

    /// Accepts only 200 and maps every other status to a ScoutError.
    fn check_response_status(response: Response, url: &str) -> Result<Response> {
        let status = response.status();

        match status {
            StatusCode::OK => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ScoutError::Authentication {
                url: url.to_string(),
                status_code: status.as_u16(),
            }),
            StatusCode::NOT_FOUND => Err(ScoutError::NotFound {
                url: url.to_string(),
            }),
            _ => Err(ScoutError::Status {
                url: url.to_string(),
                status_code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            }),
        }
    }
}
