//! Memoizing GitHub API client (decorator pattern)
//!
//! Wraps any `GitHubClient` implementation and remembers file contents for the
//! lifetime of the client. One autobump run reads the same base-branch
//! manifests for every pull request it evaluates; with this decorator each of
//! them hits the API once.
//!
//! Pull request listings are never memoized, since paging through them is
//! already a one-shot walk.

use crate::client::GitHubClient;
use crate::types::PullRequest;
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type FileKey = (String, String, String, String);

/// Client that answers repeated file reads from memory
///
/// Successful file reads (including "not found") are remembered per
/// `(owner, repo, ref, path)`. Failures are not remembered, so a retry by the
/// caller goes back to the API.
#[derive(Debug, Clone)]
pub struct CachedGitHubClient<C: GitHubClient> {
    inner: C,
    files: Arc<Mutex<HashMap<FileKey, Option<String>>>>,
}

impl<C: GitHubClient> CachedGitHubClient<C> {
    /// Create a new memoizing client around `inner`
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            files: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of remembered file reads
    pub fn cached_files(&self) -> usize {
        self.files.lock().map(|files| files.len()).unwrap_or(0)
    }

    fn cache_get(&self, key: &FileKey) -> Option<Option<String>> {
        let files = self.files.lock().ok()?;
        files.get(key).cloned()
    }

    fn cache_set(&self, key: FileKey, content: Option<String>) {
        match self.files.lock() {
            Ok(mut files) => {
                files.insert(key, content);
            }
            Err(e) => debug!("Failed to write to file cache: {}", e),
        }
    }
}

#[async_trait]
impl<C: GitHubClient> GitHubClient for CachedGitHubClient<C> {
    async fn fetch_pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        base_branch: &str,
        page: u32,
        per_page: u8,
    ) -> anyhow::Result<Vec<PullRequest>> {
        self.inner
            .fetch_pull_requests_page(owner, repo, base_branch, page, per_page)
            .await
    }

    async fn fetch_file_contents(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        path: &str,
    ) -> anyhow::Result<Option<String>> {
        let key = (
            owner.to_string(),
            repo.to_string(),
            git_ref.to_string(),
            path.to_string(),
        );

        if let Some(content) = self.cache_get(&key) {
            debug!("Cache hit for {} in {}/{} @ {}", path, owner, repo, git_ref);
            return Ok(content);
        }

        let content = self
            .inner
            .fetch_file_contents(owner, repo, git_ref, path)
            .await?;
        self.cache_set(key, content.clone());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Files keyed by `ref:path`
    #[derive(Clone)]
    struct MockClient {
        files: HashMap<String, String>,
        fail: bool,
        call_count: Arc<Mutex<usize>>,
    }

    impl MockClient {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                fail: false,
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(&[])
            }
        }

        fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl GitHubClient for MockClient {
        async fn fetch_pull_requests_page(
            &self,
            _owner: &str,
            _repo: &str,
            _base_branch: &str,
            _page: u32,
            _per_page: u8,
        ) -> anyhow::Result<Vec<PullRequest>> {
            *self.call_count.lock().unwrap() += 1;
            Ok(vec![])
        }

        async fn fetch_file_contents(
            &self,
            _owner: &str,
            _repo: &str,
            git_ref: &str,
            path: &str,
        ) -> anyhow::Result<Option<String>> {
            *self.call_count.lock().unwrap() += 1;
            if self.fail {
                anyhow::bail!("connection reset");
            }
            Ok(self.files.get(&format!("{}:{}", git_ref, path)).cloned())
        }
    }

    #[tokio::test]
    async fn test_file_reads_are_memoized() {
        let mock = MockClient::new(&[("main:package.json", "{}")]);
        let client = CachedGitHubClient::new(mock.clone());

        let first = client
            .fetch_file_contents("owner", "repo", "main", "package.json")
            .await
            .unwrap();
        assert_eq!(first.as_deref(), Some("{}"));
        assert_eq!(mock.call_count(), 1);

        let second = client
            .fetch_file_contents("owner", "repo", "main", "package.json")
            .await
            .unwrap();
        assert_eq!(second, first);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(client.cached_files(), 1);
    }

    #[tokio::test]
    async fn test_different_refs_are_separate_entries() {
        let mock = MockClient::new(&[("main:package.json", "a"), ("dev:package.json", "b")]);
        let client = CachedGitHubClient::new(mock.clone());

        let main = client
            .fetch_file_contents("owner", "repo", "main", "package.json")
            .await
            .unwrap();
        let dev = client
            .fetch_file_contents("owner", "repo", "dev", "package.json")
            .await
            .unwrap();

        assert_eq!(main.as_deref(), Some("a"));
        assert_eq!(dev.as_deref(), Some("b"));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_not_found_is_memoized() {
        let mock = MockClient::new(&[]);
        let client = CachedGitHubClient::new(mock.clone());

        for _ in 0..2 {
            let content = client
                .fetch_file_contents("owner", "repo", "main", "missing.json")
                .await
                .unwrap();
            assert_eq!(content, None);
        }
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_memoized() {
        let mock = MockClient::failing();
        let client = CachedGitHubClient::new(mock.clone());

        for _ in 0..2 {
            assert!(client
                .fetch_file_contents("owner", "repo", "main", "package.json")
                .await
                .is_err());
        }
        assert_eq!(mock.call_count(), 2);
        assert_eq!(client.cached_files(), 0);
    }

    #[tokio::test]
    async fn test_listing_passes_through() {
        let mock = MockClient::new(&[]);
        let client = CachedGitHubClient::new(mock.clone());

        for _ in 0..2 {
            client
                .fetch_pull_requests_page("owner", "repo", "main", 1, 30)
                .await
                .unwrap();
        }
        assert_eq!(mock.call_count(), 2);
    }
}
