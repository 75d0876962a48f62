use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::{ApiResponse, GitHubClient};

/// Body of `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewPullRequest<'a> {
    pub title: &'a str,
    pub head: &'a str,
    pub base: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'a str>,
}

impl GitHubClient {
    pub async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        head: &str,
        base: &str,
        body: Option<&str>,
    ) -> Result<ApiResponse<Value>> {
        let pull = NewPullRequest {
            title,
            head,
            base,
            body,
        };
        self.post_json(&format!("/repos/{owner}/{repo}/pulls"), &pull)
            .await
    }

    pub async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Result<ApiResponse<Value>> {
        self.get_json(&format!("/repos/{owner}/{repo}/pulls/{pull_number}"))
            .await
    }
}
