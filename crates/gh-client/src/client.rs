//! The `GitHubClient` seam
//!
//! Autobump needs exactly two things from GitHub: the open pull requests
//! targeting a branch, and the text of a file at some ref.

use crate::types::PullRequest;
use async_trait::async_trait;

/// Read access to pull requests and repository files
///
/// `OctocrabClient` talks to the REST API; `CachedGitHubClient` wraps any
/// implementation and memoizes file reads. Tests plug in an in-memory client.
///
/// Implementations are shared between concurrently running package checks,
/// hence `Send + Sync`.
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, PullRequestPages};
///
/// async fn open_prs(client: &dyn GitHubClient) -> anyhow::Result<usize> {
///     let mut pages = PullRequestPages::new(client, "octo", "monorepo", "main");
///     let mut open = 0;
///     while let Some(page) = pages.next_page().await? {
///         open += page.len();
///     }
///     Ok(open)
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// One page (1-based) of open pull requests whose base is `base_branch`
    ///
    /// Sorted by last update, newest first. An empty page means there are no
    /// more pull requests.
    async fn fetch_pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        base_branch: &str,
        page: u32,
        per_page: u8,
    ) -> anyhow::Result<Vec<PullRequest>>;

    /// Decoded content of `path` at `git_ref` (branch, tag or SHA)
    ///
    /// `Ok(None)` when there is no such file. Network, auth and rate limit
    /// failures are errors.
    async fn fetch_file_contents(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        path: &str,
    ) -> anyhow::Result<Option<String>>;
}
