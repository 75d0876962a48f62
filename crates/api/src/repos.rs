use serde_json::Value;

use crate::error::Result;
use crate::{ApiResponse, GitHubClient};

impl GitHubClient {
    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<ApiResponse<Value>> {
        self.get_json(&format!("/repos/{owner}/{repo}")).await
    }

    pub async fn list_branches(&self, owner: &str, repo: &str) -> Result<ApiResponse<Value>> {
        self.get_json(&format!("/repos/{owner}/{repo}/branches"))
            .await
    }

    /// Fetches a file or directory listing. `path` is passed through as-is, so
    /// nested paths such as `src/lib.rs` keep their slashes.
    pub async fn get_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<ApiResponse<Value>> {
        self.get_json(&format!("/repos/{owner}/{repo}/contents/{path}"))
            .await
    }
}
