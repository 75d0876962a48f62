use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use ghrest_api::{ApiResponse, GitHubClient, IssueState, RequestMethod};
use serde_json::Value;

use super::api_error;

#[derive(Subcommand, Debug, Clone)]
pub enum GitHubCommand {
    /// Show a user profile
    User { username: String },
    /// Show a repository
    Repo { owner: String, repo: String },
    /// List a user's repositories
    Repos {
        username: String,
        /// Page number (starts at 1)
        #[arg(long)]
        page: Option<u32>,
        /// Results per page
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Issue operations
    #[command(subcommand)]
    Issue(IssueCommand),
    /// Pull request operations
    #[command(subcommand)]
    Pr(PrCommand),
    /// List repository branches
    Branches { owner: String, repo: String },
    /// Fetch a file or directory from a repository
    Content {
        owner: String,
        repo: String,
        path: String,
    },
    /// Webhook operations
    #[command(subcommand)]
    Webhook(WebhookCommand),
    /// Send a raw request to any endpoint
    Request(RequestArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum IssueCommand {
    /// Open a new issue
    Create {
        owner: String,
        repo: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// Label to apply; repeat for several
        #[arg(long = "label")]
        labels: Vec<String>,
    },
    /// List issues
    List {
        owner: String,
        repo: String,
        /// open, closed or all
        #[arg(long, default_value = "open")]
        state: IssueState,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PrCommand {
    /// Open a pull request
    Create {
        owner: String,
        repo: String,
        #[arg(long)]
        title: String,
        /// Branch containing the changes
        #[arg(long)]
        head: String,
        /// Branch to merge into
        #[arg(long)]
        base: String,
        #[arg(long)]
        body: Option<String>,
    },
    /// Show a pull request
    Get {
        owner: String,
        repo: String,
        number: u64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum WebhookCommand {
    /// Create a repository webhook delivering JSON payloads
    Create {
        owner: String,
        repo: String,
        url: String,
        /// Event to subscribe to; repeat for several (defaults to push)
        #[arg(long = "event")]
        events: Vec<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Get,
    Post,
    Put,
    Delete,
}

impl From<MethodArg> for RequestMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Get => RequestMethod::Get,
            MethodArg::Post => RequestMethod::Post,
            MethodArg::Put => RequestMethod::Put,
            MethodArg::Delete => RequestMethod::Delete,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Endpoint relative to the base URL, e.g. /rate_limit
    pub endpoint: String,
    #[arg(short = 'X', long, value_enum)]
    pub method: Option<MethodArg>,
    /// JSON request body
    #[arg(short, long)]
    pub data: Option<String>,
}

pub async fn execute(command: GitHubCommand, client: &GitHubClient) -> Result<ApiResponse<Value>> {
    let response = match command {
        GitHubCommand::User { username } => client.get_user(&username).await,
        GitHubCommand::Repo { owner, repo } => client.get_repository(&owner, &repo).await,
        GitHubCommand::Repos {
            username,
            page,
            per_page,
        } => client.list_repositories(&username, page, per_page).await,
        GitHubCommand::Issue(IssueCommand::Create {
            owner,
            repo,
            title,
            body,
            labels,
        }) => {
            let labels = (!labels.is_empty()).then_some(labels);
            client
                .create_issue(&owner, &repo, &title, &body, labels)
                .await
        }
        GitHubCommand::Issue(IssueCommand::List { owner, repo, state }) => {
            client.list_issues(&owner, &repo, state).await
        }
        GitHubCommand::Pr(PrCommand::Create {
            owner,
            repo,
            title,
            head,
            base,
            body,
        }) => {
            client
                .create_pull_request(&owner, &repo, &title, &head, &base, body.as_deref())
                .await
        }
        GitHubCommand::Pr(PrCommand::Get {
            owner,
            repo,
            number,
        }) => client.get_pull_request(&owner, &repo, number).await,
        GitHubCommand::Branches { owner, repo } => client.list_branches(&owner, &repo).await,
        GitHubCommand::Content { owner, repo, path } => {
            client.get_content(&owner, &repo, &path).await
        }
        GitHubCommand::Webhook(WebhookCommand::Create {
            owner,
            repo,
            url,
            events,
        }) => {
            let events = (!events.is_empty()).then_some(events);
            client.create_webhook(&owner, &repo, &url, events).await
        }
        GitHubCommand::Request(args) => {
            let body = args
                .data
                .as_deref()
                .map(serde_json::from_str::<Value>)
                .transpose()
                .context("--data must be valid JSON")?;
            client
                .request(&args.endpoint, args.method.map(Into::into), body.as_ref())
                .await
        }
    };

    let response = response.map_err(api_error)?;
    if !response.is_success() {
        tracing::info!(status = response.status, "GitHub returned a non-success status");
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghrest_api::ClientConfig;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::new(ClientConfig::new("test-token").with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_issue_create_without_labels_omits_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/octo/hello/issues"))
            .and(body_json(serde_json::json!({"title": "Bug", "body": "desc"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"number": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let command = GitHubCommand::Issue(IssueCommand::Create {
            owner: "octo".to_string(),
            repo: "hello".to_string(),
            title: "Bug".to_string(),
            body: "desc".to_string(),
            labels: Vec::new(),
        });

        let response = execute(command, &client(&server)).await.unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.data["number"], 1);
    }

    #[tokio::test]
    async fn test_issue_list_passes_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octo/hello/issues"))
            .and(query_param("state", "closed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let command = GitHubCommand::Issue(IssueCommand::List {
            owner: "octo".to_string(),
            repo: "hello".to_string(),
            state: IssueState::Closed,
        });

        let response = execute(command, &client(&server)).await.unwrap();
        assert_eq!(response.data, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_request_without_method_defaults_to_get() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rate_limit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"rate": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let command = GitHubCommand::Request(RequestArgs {
            endpoint: "rate_limit".to_string(),
            method: None,
            data: None,
        });

        assert!(execute(command, &client(&server)).await.is_ok());
    }

    #[tokio::test]
    async fn test_request_rejects_invalid_json_body() {
        let server = MockServer::start().await;

        let command = GitHubCommand::Request(RequestArgs {
            endpoint: "/custom".to_string(),
            method: Some(MethodArg::Post),
            data: Some("{not json".to_string()),
        });

        let err = execute(command, &client(&server)).await.unwrap_err();
        assert!(err.to_string().contains("--data must be valid JSON"));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/ghost"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Not Found"})),
            )
            .mount(&server)
            .await;

        let command = GitHubCommand::User {
            username: "ghost".to_string(),
        };

        let response = execute(command, &client(&server)).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.data["message"], "Not Found");
    }
}
