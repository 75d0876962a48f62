//! Minimal fetch wrapper for arbitrary JSON APIs.
//!
//! Unlike [`crate::GitHubClient`], any non-2xx status is an error here and the
//! decoded body is returned directly rather than wrapped in an envelope.

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};

/// Per-request options forwarded untouched to the transport.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the body and sets a JSON content type.
    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_string(value)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }
}

#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    base_url: String,
}

impl FetchClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build().map_err(ApiError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests `base_url + path`. The path is appended verbatim.
    pub async fn request<T: DeserializeOwned>(&self, path: &str, options: FetchOptions) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        debug!(method = %options.method, url = %url, "Sending request");

        let mut req = self.client.request(options.method, &url);
        for (name, value) in &options.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| ApiError::InvalidHeader {
                    name: name.clone(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader {
                    name: name.clone(),
                })?;
            req = req.header(header_name, header_value);
        }
        if let Some(body) = options.body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(ApiError::RequestFailed)?;
        let status = response.status();

        if !status.is_success() {
            warn!(status = status.as_u16(), url = %url, "Request returned non-success status");
            return Err(ApiError::RequestUnsuccessful);
        }

        let payload = response.bytes().await.map_err(ApiError::RequestFailed)?;
        Ok(serde_json::from_slice(&payload)?)
    }
}

/// Factory spelling of [`FetchClient::new`].
pub fn custom_api_client(base_url: impl Into<String>) -> Result<FetchClient> {
    FetchClient::new(base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_default_to_get_without_body() {
        let options = FetchOptions::new();
        assert_eq!(options.method, Method::GET);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
    }

    #[test]
    fn test_with_json_sets_body_and_content_type() {
        let options = FetchOptions::new()
            .with_method(Method::POST)
            .with_json(&json!({"a": 1}))
            .unwrap();

        assert_eq!(options.body.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(
            options.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn test_custom_api_client_keeps_base_url() {
        let client = custom_api_client("http://localhost:1234/api").unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/api");
    }
}
