//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from the bump rules to keep this crate
//! pure and reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request from the GitHub API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// Open or closed
    pub state: PullRequestState,

    /// Whether the PR has been merged
    pub merged: bool,

    /// Names of the labels attached to the PR
    pub labels: Vec<String>,

    /// Branch the PR targets (e.g., "main")
    pub base: BranchRef,

    /// Branch the PR comes from (e.g., "feature/foo")
    pub head: BranchRef,

    /// When the PR was last updated
    pub updated_at: DateTime<Utc>,

    /// PR URL for opening in browser
    pub html_url: String,
}

impl PullRequest {
    pub fn is_open(&self) -> bool {
        self.state == PullRequestState::Open
    }
}

/// State of a pull request as reported by GitHub
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    #[default]
    Open,
    Closed,
}

impl std::fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PullRequestState::Open => f.write_str("open"),
            PullRequestState::Closed => f.write_str("closed"),
        }
    }
}

/// One side of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    /// Branch name
    pub ref_name: String,

    /// Repository owning the branch, `None` when a fork was deleted
    pub repo: Option<RepoRef>,
}

/// Owner and name of a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
