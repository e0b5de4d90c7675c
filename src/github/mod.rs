pub mod types;

pub use types::{Issue, IssueState};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::{Config, ConfigError, RepoId};

/// Issues requested per run. There is no pagination past the first page.
pub const PAGE_SIZE: u32 = 100;

const CLIENT_USER_AGENT: &str = "GitHub-Pages-Blog-Generator";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode issues: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read issues file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the blog's issues come from.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Short description for log output (e.g., "octocat/blog").
    fn describe(&self) -> String;

    /// Fetch every issue, newest first, with pull requests already removed.
    async fn fetch_issues(&self) -> Result<Vec<Issue>, FetchError>;
}

/// Live source: the repository's issue listing on the GitHub REST API.
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    repo: RepoId,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let repo = config.repo()?;
        let token = config.github_token().map(str::to_string);
        if token.is_none() {
            warn!("GITHUB_TOKEN is not set; sending unauthenticated request");
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_url: config.github.api_url.trim_end_matches('/').to_string(),
            repo,
            token,
        })
    }

    /// Issue listing URL: all states, newest first, one page.
    pub fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues?state=all&sort=created&direction=desc&per_page={}",
            self.api_url, self.repo.owner, self.repo.name, PAGE_SIZE
        )
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    fn describe(&self) -> String {
        self.repo.to_string()
    }

    #[instrument(skip_all)]
    async fn fetch_issues(&self) -> Result<Vec<Issue>, FetchError> {
        let url = self.issues_url();
        debug!(repo = %self.repo, %url, "requesting issue listing");

        let mut request = self
            .client
            .get(&url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(ACCEPT, GITHUB_ACCEPT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), body_bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let issues = types::parse_issues(&body)?;
        debug!(issues = issues.len(), "decoded issues");
        Ok(issues)
    }
}

/// Offline source: a saved issue-listing response on disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IssueSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip_all)]
    async fn fetch_issues(&self) -> Result<Vec<Issue>, FetchError> {
        debug!(path = %self.path.display(), "reading saved issues");
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::FileRead {
                path: self.path.clone(),
                source,
            })?;
        Ok(types::parse_issues(&json)?)
    }
}
