//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! This client makes real API calls without any memoization.

use crate::client::GitHubClient;
use crate::types::{BranchRef, PullRequest, PullRequestState, RepoRef};
use crate::DEFAULT_API_URL;
use anyhow::Context;
use async_trait::async_trait;
use log::{debug, info};
use octocrab::params;
use octocrab::Octocrab;
use std::sync::Arc;

/// Direct GitHub API client using octocrab
///
/// This is the base implementation that makes actual API calls.
/// It can be wrapped by `CachedGitHubClient` to memoize file reads.
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Build an authenticated client for the given API base URL
    ///
    /// Anything other than the public API URL is treated as a GitHub
    /// Enterprise endpoint (e.g., `https://ghe.example.com/api/v3`).
    pub fn connect(token: impl Into<String>, api_url: &str) -> anyhow::Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.into());

        let api_url = api_url.trim_end_matches('/');
        if api_url != DEFAULT_API_URL {
            builder = builder.base_uri(api_url).context("Failed to set base URI")?;
        }

        let octocrab = builder.build().context("Failed to build Octocrab client")?;
        info!("GitHub client created for {}", api_url);
        Ok(Self::new(Arc::new(octocrab)))
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        base_branch: &str,
        page: u32,
        per_page: u8,
    ) -> anyhow::Result<Vec<PullRequest>> {
        debug!(
            "Fetching PRs for {}/{} (base {}, page {})",
            owner, repo, base_branch, page
        );

        let page = self
            .octocrab
            .pulls(owner, repo)
            .list()
            .state(params::State::Open)
            .base(base_branch)
            .sort(params::pulls::Sort::Updated)
            .direction(params::Direction::Descending)
            .per_page(per_page)
            .page(page)
            .send()
            .await
            .with_context(|| format!("Failed to list pull requests for {}/{}", owner, repo))?;

        let prs: Vec<PullRequest> = page.items.iter().map(convert_pull_request).collect();

        debug!("Fetched {} PRs for {}/{}", prs.len(), owner, repo);
        Ok(prs)
    }

    async fn fetch_file_contents(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        path: &str,
    ) -> anyhow::Result<Option<String>> {
        debug!("Fetching {} from {}/{} @ {}", path, owner, repo, git_ref);

        let result = self
            .octocrab
            .repos(owner, repo)
            .get_content()
            .path(path)
            .r#ref(git_ref)
            .send()
            .await;

        let mut contents = match result {
            Ok(contents) => contents,
            Err(octocrab::Error::GitHub { source, .. }) if source.status_code.as_u16() == 404 => {
                debug!("{} not found in {}/{} @ {}", path, owner, repo, git_ref);
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to fetch {} from {}/{} @ {}", path, owner, repo, git_ref)
                });
            }
        };

        // A directory listing has several items; a file has exactly one
        if contents.items.len() != 1 {
            debug!("{} in {}/{} @ {} is not a file", path, owner, repo, git_ref);
            return Ok(None);
        }

        Ok(contents.items.remove(0).decoded_content())
    }
}

/// Convert octocrab PullRequest to our PullRequest type
fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        state: pr
            .state
            .as_ref()
            .map(convert_state)
            .unwrap_or_default(),
        merged: pr.merged.unwrap_or(false) || pr.merged_at.is_some(),
        labels: pr
            .labels
            .as_ref()
            .map(|labels| labels.iter().map(|l| l.name.clone()).collect())
            .unwrap_or_default(),
        base: BranchRef {
            ref_name: pr.base.ref_field.clone(),
            repo: pr.base.repo.as_ref().and_then(convert_repository),
        },
        head: BranchRef {
            ref_name: pr.head.ref_field.clone(),
            repo: pr.head.repo.as_ref().and_then(convert_repository),
        },
        updated_at: pr.updated_at.unwrap_or_else(chrono::Utc::now),
        html_url: pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_default(),
    }
}

/// Convert octocrab IssueState to our enum
fn convert_state(state: &octocrab::models::IssueState) -> PullRequestState {
    match state {
        octocrab::models::IssueState::Open => PullRequestState::Open,
        _ => PullRequestState::Closed,
    }
}

/// Owner login and name of a repository, if GitHub reported an owner
fn convert_repository(repo: &octocrab::models::Repository) -> Option<RepoRef> {
    let owner = repo.owner.as_ref()?;
    Some(RepoRef::new(owner.login.clone(), repo.name.clone()))
}
