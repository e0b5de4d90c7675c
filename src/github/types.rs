use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An issue fetched from the GitHub API, repurposed as a blog post.
///
/// Required fields fail the decode when absent; `body` is optional because
/// GitHub sends `null` for issues created without a description.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Issue number (e.g., 42)
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Markdown body, if any
    #[serde(default)]
    pub body: Option<String>,
    /// Open or closed
    pub state: IssueState,
    /// Creation time, always UTC on the wire
    pub created_at: DateTime<Utc>,
    /// Author account
    pub user: User,
    /// Number of comments
    pub comments: u64,
    /// Labels in the order GitHub returns them
    pub labels: Vec<Label>,
    /// Link to the issue on github.com
    pub html_url: String,
}

impl Issue {
    /// Author's GitHub login
    pub fn author(&self) -> &str {
        &self.user.login
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
}

/// A named, colored tag attached to an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
    /// Six hex digits without the leading `#`
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[serde(alias = "OPEN")]
    Open,
    #[serde(alias = "CLOSED")]
    Closed,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a GitHub issue-listing response, dropping pull requests.
///
/// The issues endpoint returns pull requests too; they are recognisable only
/// by the presence of a `pull_request` key, so the filter runs on the raw
/// JSON before each record is decoded into an [`Issue`].
pub fn parse_issues(json: &str) -> Result<Vec<Issue>, serde_json::Error> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
    records
        .into_iter()
        .filter(|record| record.get("pull_request").is_none())
        .map(serde_json::from_value)
        .collect()
}
