use serde_json::Value;

use crate::error::Result;
use crate::{ApiResponse, GitHubClient};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 30;

impl GitHubClient {
    /// `GET /users/{username}`
    pub async fn get_user(&self, username: &str) -> Result<ApiResponse<Value>> {
        self.get_json(&format!("/users/{username}")).await
    }

    /// `GET /users/{username}/repos`; `None` falls back to page 1, 30 per page.
    pub async fn list_repositories(
        &self,
        username: &str,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<ApiResponse<Value>> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        self.get_json(&format!(
            "/users/{username}/repos?page={page}&per_page={per_page}"
        ))
        .await
    }
}
