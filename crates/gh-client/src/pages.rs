//! Lazy pull request listing
//!
//! Pages are fetched one at a time as the caller asks for them, so a consumer
//! that stops early never pays for the rest of the listing.

use crate::client::GitHubClient;
use crate::types::PullRequest;
use log::debug;

/// Default page size for pull request listings
pub const PER_PAGE: u8 = 30;

/// Paginator over the open pull requests targeting one base branch
///
/// Finite and ordered (most recently updated first). Call [`restart`] to walk
/// the listing again from the first page.
///
/// [`restart`]: PullRequestPages::restart
pub struct PullRequestPages<'a, C: GitHubClient + ?Sized> {
    client: &'a C,
    owner: String,
    repo: String,
    base_branch: String,
    per_page: u8,
    next_page: Option<u32>,
}

impl<'a, C: GitHubClient + ?Sized> PullRequestPages<'a, C> {
    pub fn new(
        client: &'a C,
        owner: impl Into<String>,
        repo: impl Into<String>,
        base_branch: impl Into<String>,
    ) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
            base_branch: base_branch.into(),
            per_page: PER_PAGE,
            next_page: Some(1),
        }
    }

    /// Use a different page size
    pub fn with_per_page(mut self, per_page: u8) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Fetch the next page, `None` once the listing is exhausted
    pub async fn next_page(&mut self) -> anyhow::Result<Option<Vec<PullRequest>>> {
        let Some(page_num) = self.next_page else {
            return Ok(None);
        };

        debug!(
            "Fetching page {} of PRs for {}/{} (base {})",
            page_num, self.owner, self.repo, self.base_branch
        );

        let page = self
            .client
            .fetch_pull_requests_page(
                &self.owner,
                &self.repo,
                &self.base_branch,
                page_num,
                self.per_page,
            )
            .await?;

        if page.is_empty() {
            self.next_page = None;
            return Ok(None);
        }

        self.next_page = if page.len() < usize::from(self.per_page) {
            None
        } else {
            Some(page_num + 1)
        };

        Ok(Some(page))
    }

    /// Start again from the first page
    pub fn restart(&mut self) {
        self.next_page = Some(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BranchRef, PullRequestState};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    struct MockClient {
        prs: Vec<PullRequest>,
        requested_pages: Mutex<Vec<u32>>,
    }

    impl MockClient {
        fn with_prs(count: u64) -> Self {
            Self {
                prs: (1..=count).map(create_test_pr).collect(),
                requested_pages: Mutex::new(Vec::new()),
            }
        }

        fn requested_pages(&self) -> Vec<u32> {
            self.requested_pages.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GitHubClient for MockClient {
        async fn fetch_pull_requests_page(
            &self,
            _owner: &str,
            _repo: &str,
            _base_branch: &str,
            page: u32,
            per_page: u8,
        ) -> anyhow::Result<Vec<PullRequest>> {
            self.requested_pages.lock().unwrap().push(page);
            let per_page = usize::from(per_page);
            let start = (page as usize - 1) * per_page;
            Ok(self.prs.iter().skip(start).take(per_page).cloned().collect())
        }

        async fn fetch_file_contents(
            &self,
            _owner: &str,
            _repo: &str,
            _git_ref: &str,
            _path: &str,
        ) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
    }

    fn create_test_pr(number: u64) -> PullRequest {
        PullRequest {
            number,
            title: format!("Test PR {}", number),
            state: PullRequestState::Open,
            merged: false,
            labels: vec![],
            base: BranchRef {
                ref_name: "main".to_string(),
                repo: None,
            },
            head: BranchRef {
                ref_name: format!("feature-{}", number),
                repo: None,
            },
            updated_at: Utc::now(),
            html_url: String::new(),
        }
    }

    async fn collect_numbers<C: GitHubClient>(pages: &mut PullRequestPages<'_, C>) -> Vec<u64> {
        let mut numbers = Vec::new();
        while let Some(page) = pages.next_page().await.unwrap() {
            numbers.extend(page.iter().map(|pr| pr.number));
        }
        numbers
    }

    #[tokio::test]
    async fn test_walks_all_pages_in_order() {
        let mock = MockClient::with_prs(5);
        let mut pages = PullRequestPages::new(&mock, "owner", "repo", "main").with_per_page(2);

        assert_eq!(collect_numbers(&mut pages).await, vec![1, 2, 3, 4, 5]);
        // Short third page ends the listing without asking for a fourth
        assert_eq!(mock.requested_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_full_last_page_needs_one_empty_probe() {
        let mock = MockClient::with_prs(4);
        let mut pages = PullRequestPages::new(&mock, "owner", "repo", "main").with_per_page(2);

        assert_eq!(collect_numbers(&mut pages).await, vec![1, 2, 3, 4]);
        assert_eq!(mock.requested_pages(), vec![1, 2, 3]);
        assert!(pages.next_page().await.unwrap().is_none());
        assert_eq!(mock.requested_pages().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let mock = MockClient::with_prs(0);
        let mut pages = PullRequestPages::new(&mock, "owner", "repo", "main");

        assert!(pages.next_page().await.unwrap().is_none());
        assert_eq!(mock.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn test_pages_are_fetched_lazily_and_restartable() {
        let mock = MockClient::with_prs(5);
        let mut pages = PullRequestPages::new(&mock, "owner", "repo", "main").with_per_page(2);

        let first = pages.next_page().await.unwrap().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(mock.requested_pages(), vec![1]);

        pages.restart();
        assert_eq!(collect_numbers(&mut pages).await, vec![1, 2, 3, 4, 5]);
        assert_eq!(mock.requested_pages(), vec![1, 1, 2, 3]);
    }
}
