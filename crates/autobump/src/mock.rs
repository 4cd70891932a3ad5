//! In-memory GitHub client for orchestrator tests

use async_trait::async_trait;
use chrono::Utc;
use gh_client::{BranchRef, GitHubClient, PullRequest, PullRequestState, RepoRef};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub const OWNER: &str = "francescoferraioli";
pub const REPO: &str = "not-a-real-repo";

/// Serves pull request listings and manifests from memory
#[derive(Clone, Default)]
pub struct MockClient {
    pulls: HashMap<String, Vec<PullRequest>>,
    files: HashMap<String, String>,
    broken_refs: HashSet<String>,
    file_reads: Arc<Mutex<usize>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open pull requests returned when listing `base`
    pub fn with_pulls(mut self, base: &str, pulls: Vec<PullRequest>) -> Self {
        self.pulls.insert(base.to_string(), pulls);
        self
    }

    /// A `package.json` holding `version` in the test repository
    pub fn with_version(self, git_ref: &str, dir: &str, version: &str) -> Self {
        let path = if dir.is_empty() {
            "package.json".to_string()
        } else {
            format!("{}/package.json", dir)
        };
        self.with_file(git_ref, &path, &manifest(version))
    }

    pub fn with_file(self, git_ref: &str, path: &str, content: &str) -> Self {
        self.with_file_in(OWNER, REPO, git_ref, path, content)
    }

    /// A file in any repository, e.g. a fork
    pub fn with_file_in(
        mut self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        path: &str,
        content: &str,
    ) -> Self {
        self.files.insert(file_key(owner, repo, git_ref, path), content.to_string());
        self
    }

    /// Every read at `git_ref` fails like a dropped connection
    pub fn with_broken_ref(mut self, git_ref: &str) -> Self {
        self.broken_refs.insert(git_ref.to_string());
        self
    }

    pub fn file_reads(&self) -> usize {
        *self.file_reads.lock().unwrap()
    }
}

/// Minimal `package.json` declaring `version`
pub fn manifest(version: &str) -> String {
    format!(r#"{{ "name": "pkg", "version": "{}" }}"#, version)
}

fn file_key(owner: &str, repo: &str, git_ref: &str, path: &str) -> String {
    format!("{}/{}@{}:{}", owner, repo, git_ref, path)
}

#[async_trait]
impl GitHubClient for MockClient {
    async fn fetch_pull_requests_page(
        &self,
        _owner: &str,
        _repo: &str,
        base_branch: &str,
        page: u32,
        per_page: u8,
    ) -> anyhow::Result<Vec<PullRequest>> {
        let pulls = self.pulls.get(base_branch).cloned().unwrap_or_default();
        Ok(pulls
            .into_iter()
            .skip((page as usize - 1) * usize::from(per_page))
            .take(usize::from(per_page))
            .collect())
    }

    async fn fetch_file_contents(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        path: &str,
    ) -> anyhow::Result<Option<String>> {
        *self.file_reads.lock().unwrap() += 1;
        if self.broken_refs.contains(git_ref) {
            anyhow::bail!("connection reset while reading {}", path);
        }
        Ok(self.files.get(&file_key(owner, repo, git_ref, path)).cloned())
    }
}

/// Open pull request from `head` into `base` within the test repository
pub fn pull_request(number: u64, base: &str, head: &str, labels: &[&str]) -> PullRequest {
    let repo = || Some(RepoRef::new(OWNER, REPO));
    PullRequest {
        number,
        title: format!("PR {}", number),
        state: PullRequestState::Open,
        merged: false,
        labels: labels.iter().map(|label| label.to_string()).collect(),
        base: BranchRef {
            ref_name: base.to_string(),
            repo: repo(),
        },
        head: BranchRef {
            ref_name: head.to_string(),
            repo: repo(),
        },
        updated_at: Utc::now(),
        html_url: format!("https://github.com/{}/{}/pull/{}", OWNER, REPO, number),
    }
}
