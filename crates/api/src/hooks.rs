use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::{ApiResponse, GitHubClient};

pub const DEFAULT_WEBHOOK_EVENT: &str = "push";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebhookConfig<'a> {
    pub url: &'a str,
    pub content_type: &'static str,
}

/// Body of `POST /repos/{owner}/{repo}/hooks`. Hooks are always created active
/// and deliver JSON payloads.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewWebhook<'a> {
    pub config: WebhookConfig<'a>,
    pub events: Vec<String>,
    pub active: bool,
}

impl<'a> NewWebhook<'a> {
    pub fn new(url: &'a str, events: Option<Vec<String>>) -> Self {
        Self {
            config: WebhookConfig {
                url,
                content_type: "json",
            },
            events: events.unwrap_or_else(|| vec![DEFAULT_WEBHOOK_EVENT.to_string()]),
            active: true,
        }
    }
}

impl GitHubClient {
    pub async fn create_webhook(
        &self,
        owner: &str,
        repo: &str,
        url: &str,
        events: Option<Vec<String>>,
    ) -> Result<ApiResponse<Value>> {
        let hook = NewWebhook::new(url, events);
        self.post_json(&format!("/repos/{owner}/{repo}/hooks"), &hook)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_webhook_defaults_to_push() {
        let hook = NewWebhook::new("https://x", None);
        assert_eq!(
            serde_json::to_value(&hook).unwrap(),
            json!({
                "config": {"url": "https://x", "content_type": "json"},
                "events": ["push"],
                "active": true
            })
        );
    }

    #[test]
    fn test_webhook_custom_events_stay_active() {
        let hook = NewWebhook::new(
            "https://x",
            Some(vec!["issues".to_string(), "pull_request".to_string()]),
        );
        assert_eq!(hook.events, vec!["issues", "pull_request"]);
        assert!(hook.active);
    }
}
