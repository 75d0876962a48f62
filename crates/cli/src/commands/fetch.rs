use anyhow::{anyhow, Result};
use clap::Args;
use ghrest_api::{custom_api_client, FetchOptions};
use reqwest::Method;
use serde_json::Value;

use super::api_error;

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Base URL, used verbatim as the prefix of the request URL
    pub base_url: String,
    /// Path appended to the base URL, e.g. /v1/items
    pub path: String,
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,
    /// Extra header as `Name: value`; repeat for several
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,
    /// Raw request body
    #[arg(short, long)]
    pub data: Option<String>,
}

impl FetchArgs {
    fn options(&self) -> Result<FetchOptions> {
        let method = Method::from_bytes(self.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| anyhow!("Invalid HTTP method '{}'", self.method))?;

        let mut options = FetchOptions::new().with_method(method);
        for header in &self.headers {
            let (name, value) = header
                .split_once(':')
                .ok_or_else(|| anyhow!("Header '{header}' must look like `Name: value`"))?;
            options = options.with_header(name.trim(), value.trim());
        }
        if let Some(data) = &self.data {
            options = options.with_body(data.clone());
        }

        Ok(options)
    }
}

pub async fn execute(args: FetchArgs) -> Result<Value> {
    let options = args.options()?;
    let client = custom_api_client(args.base_url).map_err(api_error)?;
    client
        .request(&args.path, options)
        .await
        .map_err(api_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn args(base_url: String, path: &str) -> FetchArgs {
        FetchArgs {
            base_url,
            path: path.to_string(),
            method: "get".to_string(),
            headers: Vec::new(),
            data: None,
        }
    }

    #[test]
    fn test_options_parse_headers_and_method() {
        let mut fetch = args("http://localhost".to_string(), "/x");
        fetch.method = "patch".to_string();
        fetch.headers = vec!["X-Trace:  abc ".to_string()];
        fetch.data = Some("payload".to_string());

        let options = fetch.options().unwrap();
        assert_eq!(options.method, Method::PATCH);
        assert_eq!(
            options.headers,
            vec![("X-Trace".to_string(), "abc".to_string())]
        );
        assert_eq!(options.body.as_deref(), Some("payload"));
    }

    #[test]
    fn test_options_reject_malformed_header() {
        let mut fetch = args("http://localhost".to_string(), "/x");
        fetch.headers = vec!["no-colon".to_string()];
        assert!(fetch.options().is_err());
    }

    #[tokio::test]
    async fn test_execute_sends_options() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/items"))
            .and(header("x-trace", "abc"))
            .and(body_string("hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let mut fetch = args(format!("{}/api", server.uri()), "/items");
        fetch.method = "POST".to_string();
        fetch.headers = vec!["X-Trace: abc".to_string()];
        fetch.data = Some("hello".to_string());

        let value = execute(fetch).await.unwrap();
        assert_eq!(value, serde_json::json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_execute_fails_on_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = execute(args(server.uri(), "/missing")).await.unwrap_err();
        assert_eq!(err.to_string(), "request failed");
    }
}
