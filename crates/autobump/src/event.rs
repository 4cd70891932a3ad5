//! Typed webhook events
//!
//! The Actions runner hands us the event name and a JSON payload. Both are
//! validated here so the rest of autobump only ever sees [`GitHubEvent`].

use anyhow::Context;
use chrono::{DateTime, Utc};
use gh_client::{BranchRef, PullRequest, PullRequestState, RepoRef};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const PUSH: &str = "push";
const PULL_REQUEST: &str = "pull_request";
const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Errors turning a raw payload into an event
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Unknown event type '{0}', only 'push' and 'pull_request' are supported.")]
    Unsupported(String),

    #[error("Invalid '{event}' event payload: {source}")]
    InvalidPayload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("The '{0}' event payload has no repository owner")]
    MissingOwner(&'static str),
}

/// An event autobump knows how to handle
#[derive(Debug, Clone)]
pub enum GitHubEvent {
    Push(PushEvent),
    PullRequest(PullRequestEvent),
}

/// A push to some ref of a repository
#[derive(Debug, Clone)]
pub struct PushEvent {
    /// Full ref, e.g. `refs/heads/main`
    pub git_ref: String,
    pub repository: RepoRef,
}

impl PushEvent {
    /// Branch name, `None` for tags and other non-branch refs
    pub fn branch(&self) -> Option<&str> {
        self.git_ref.strip_prefix(BRANCH_REF_PREFIX)
    }
}

/// Activity on a single pull request
#[derive(Debug, Clone)]
pub struct PullRequestEvent {
    /// e.g. `opened`, `labeled`, `synchronize`
    pub action: String,
    pub pull_request: PullRequest,
}

impl GitHubEvent {
    /// Parse an event from its name and JSON payload
    pub fn parse(name: &str, payload: &str) -> Result<Self, EventError> {
        match name {
            PUSH => {
                let raw: PushPayload = serde_json::from_str(payload).map_err(|source| {
                    EventError::InvalidPayload {
                        event: PUSH,
                        source,
                    }
                })?;
                Ok(GitHubEvent::Push(PushEvent {
                    git_ref: raw.git_ref,
                    repository: raw
                        .repository
                        .into_repo_ref()
                        .ok_or(EventError::MissingOwner(PUSH))?,
                }))
            }
            PULL_REQUEST => {
                let raw: PullRequestPayload = serde_json::from_str(payload).map_err(|source| {
                    EventError::InvalidPayload {
                        event: PULL_REQUEST,
                        source,
                    }
                })?;
                Ok(GitHubEvent::PullRequest(PullRequestEvent {
                    action: raw.action,
                    pull_request: raw.pull_request.into_pull_request(),
                }))
            }
            other => Err(EventError::Unsupported(other.to_string())),
        }
    }

    /// Read and parse the payload file the runner points at
    ///
    /// The event name is checked before touching the file.
    pub fn from_file(name: &str, path: &Path) -> anyhow::Result<Self> {
        if name != PUSH && name != PULL_REQUEST {
            return Err(EventError::Unsupported(name.to_string()).into());
        }

        let payload = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event payload {}", path.display()))?;
        log::debug!("EVENT NAME: {}", name);
        log::debug!("EVENT DATA: {}", payload);

        Ok(Self::parse(name, &payload)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GitHubEvent::Push(_) => PUSH,
            GitHubEvent::PullRequest(_) => PULL_REQUEST,
        }
    }
}

// Wire shapes of the webhook payloads, only the fields autobump reads

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(rename = "ref")]
    git_ref: String,
    repository: RepositoryPayload,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    action: String,
    pull_request: PullPayload,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LabelPayload {
    name: String,
}

#[derive(Debug, Deserialize)]
struct BranchPayload {
    #[serde(rename = "ref")]
    ref_name: String,
    #[serde(default)]
    repo: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct PullPayload {
    number: u64,
    #[serde(default)]
    title: Option<String>,
    state: PullRequestState,
    #[serde(default)]
    merged: Option<bool>,
    #[serde(default)]
    merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    labels: Vec<LabelPayload>,
    base: BranchPayload,
    head: BranchPayload,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    html_url: Option<String>,
}

impl RepositoryPayload {
    /// Push payloads carry `owner.name`, everything else `owner.login`
    fn into_repo_ref(self) -> Option<RepoRef> {
        let owner = self.owner.login.or(self.owner.name)?;
        Some(RepoRef::new(owner, self.name))
    }
}

impl BranchPayload {
    fn into_branch_ref(self) -> BranchRef {
        BranchRef {
            ref_name: self.ref_name,
            repo: self.repo.and_then(RepositoryPayload::into_repo_ref),
        }
    }
}

impl PullPayload {
    fn into_pull_request(self) -> PullRequest {
        PullRequest {
            number: self.number,
            title: self.title.unwrap_or_default(),
            state: self.state,
            merged: self.merged.unwrap_or(false) || self.merged_at.is_some(),
            labels: self.labels.into_iter().map(|label| label.name).collect(),
            base: self.base.into_branch_ref(),
            head: self.head.into_branch_ref(),
            updated_at: self.updated_at.unwrap_or_else(Utc::now),
            html_url: self.html_url.unwrap_or_default(),
        }
    }
}
