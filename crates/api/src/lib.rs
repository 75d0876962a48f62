pub mod error;
pub mod fetch;
pub mod hooks;
pub mod issues;
pub mod pulls;
pub mod repos;
pub mod response;
pub mod users;

use std::fmt;

use error::{ApiError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

pub use fetch::{custom_api_client, FetchClient, FetchOptions};
pub use hooks::{NewWebhook, WebhookConfig};
pub use issues::{IssueState, NewIssue};
pub use pulls::NewPullRequest;
pub use response::ApiResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_API_VERSION: &str = "2022-11-28";
pub const DEFAULT_USER_AGENT: &str = "GitHubApiClient";

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "x-github-api-version";

/// HTTP verbs the dispatcher accepts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RequestMethod> for Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Delete => Method::DELETE,
        }
    }
}

/// Settings captured when a [`GitHubClient`] is built. Only the token is required.
#[derive(Clone)]
pub struct ClientConfig {
    pub token: String,
    pub base_url: String,
    pub version: String,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let mut auth = header_value("Authorization", &format!("Bearer {}", self.token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            HeaderName::from_static(API_VERSION_HEADER),
            header_value("X-GitHub-Api-Version", &self.version)?,
        );
        headers.insert(USER_AGENT, header_value("User-Agent", &self.user_agent)?);

        Ok(headers)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader {
        name: name.to_string(),
    })
}

/// GitHub REST client. Every call goes through [`GitHubClient::dispatch`] and
/// yields exactly one request and one [`ApiResponse`], whatever the status code.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    config: ClientConfig,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(ApiError::InvalidUrl)?;

        let client = Client::builder()
            .default_headers(config.default_headers()?)
            .build()
            .map_err(ApiError::RequestFailed)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `method` to `endpoint` (relative to the base URL) and wraps the
    /// decoded JSON payload with the status and response headers.
    pub async fn dispatch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: RequestMethod,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>> {
        let url = self.endpoint_url(endpoint);

        debug!(method = %method, url = %url, "Sending request");

        let mut req = self.client.request(method.into(), &url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(ApiError::RequestFailed)?;
        let status = response.status().as_u16();
        let headers = crate::response::collect_headers(response.headers());
        let payload = response.bytes().await.map_err(ApiError::RequestFailed)?;

        debug!(status, bytes = payload.len(), "Received response");

        let data = serde_json::from_slice(&payload)?;

        Ok(ApiResponse {
            data,
            status,
            headers,
        })
    }

    /// Raw access to the dispatcher for endpoints without a named method.
    pub async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: Option<RequestMethod>,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>> {
        self.dispatch(endpoint, method.unwrap_or_default(), body).await
    }

    pub(crate) async fn get_json(&self, endpoint: &str) -> Result<ApiResponse<serde_json::Value>> {
        self.dispatch(endpoint, RequestMethod::Get, Option::<&()>::None)
            .await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiResponse<serde_json::Value>> {
        self.dispatch(endpoint, RequestMethod::Post, Some(body))
            .await
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.config.base_url, endpoint)
        } else {
            format!("{}/{}", self.config.base_url, endpoint)
        }
    }
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
