//! Bump orchestration
//!
//! `AutoBumper` ties the pieces together: it finds the pull requests an event
//! affects, turns their labels into bump candidates, reads the manifests on
//! both sides of each pull request and keeps the packages whose head branch
//! has not reached the target version yet.

use crate::event::{PullRequestEvent, PushEvent};
use crate::workflow::Group;
use anyhow::Context;
use autobump_config::Config;
use autobump_core::{
    directives_from_labels, evaluate, manifest_path, match_candidates, read_version, BumpPlan,
    PackageBumpResult, PackageCandidate, PackageDescriptor,
};
use gh_client::{GitHubClient, PullRequest, PullRequestPages, RepoRef};
use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinSet;

/// The parts of [`Config`] the orchestrator needs
#[derive(Debug, Clone, Default)]
pub struct BumpSettings {
    pub packages: Vec<PackageDescriptor>,
    pub filter_labels: Vec<String>,
    pub dry_run: bool,
}

impl From<&Config> for BumpSettings {
    fn from(config: &Config) -> Self {
        Self {
            packages: config.packages.clone(),
            filter_labels: config.filter_labels.clone(),
            dry_run: config.dry_run,
        }
    }
}

/// Where a manifest is read from: a repository at some ref
#[derive(Debug, Clone)]
struct ManifestSource {
    repo: RepoRef,
    git_ref: String,
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repo, self.git_ref)
    }
}

/// Works out which packages each affected pull request should bump
pub struct AutoBumper<C: GitHubClient + 'static> {
    client: Arc<C>,
    settings: BumpSettings,
}

impl<C: GitHubClient + 'static> AutoBumper<C> {
    pub fn new(client: C, settings: BumpSettings) -> Self {
        Self {
            client: Arc::new(client),
            settings,
        }
    }

    /// Evaluate every open pull request targeting the pushed branch
    pub async fn handle_push(&self, event: &PushEvent) -> anyhow::Result<BumpPlan> {
        info!("Handling push event on ref '{}'", event.git_ref);

        let Some(base_branch) = event.branch() else {
            warn!("Push event was not on a branch, skipping.");
            return Ok(BumpPlan::new());
        };

        let repository = &event.repository;
        let mut pages = PullRequestPages::new(
            self.client.as_ref(),
            &repository.owner,
            &repository.name,
            base_branch,
        );

        let mut plan = BumpPlan::new();
        let mut evaluated = 0usize;
        while let Some(page) = pages.next_page().await.with_context(|| {
            format!(
                "Failed to list pull requests of {} targeting '{}'",
                repository, base_branch
            )
        })? {
            for pull in page {
                let _group = Group::start(format!("PR-{}", pull.number));
                evaluated += 1;
                let results = self.packages_to_bump(repository, &pull).await?;
                plan.extend_branch(pull.head.ref_name.clone(), results);
            }
        }

        info!(
            "Auto bump complete, {} pull request(s) that point to base branch '{}' were evaluated.",
            evaluated, base_branch
        );

        Ok(plan)
    }

    /// Evaluate the pull request the event is about
    pub async fn handle_pull_request(&self, event: &PullRequestEvent) -> anyhow::Result<BumpPlan> {
        let pull = &event.pull_request;
        info!(
            "Handling pull_request event triggered by action '{}' on #{}",
            event.action, pull.number
        );

        let Some(base_repo) = pull.base.repo.as_ref().or(pull.head.repo.as_ref()) else {
            warn!("Skipping pull request, the payload names no repository.");
            return Ok(BumpPlan::new());
        };

        let _group = Group::start(format!("PR-{}", pull.number));
        let mut plan = BumpPlan::new();
        let results = self.packages_to_bump(base_repo, pull).await?;
        plan.extend_branch(pull.head.ref_name.clone(), results);
        Ok(plan)
    }

    /// Packages a pull request asks to bump, before looking at versions
    ///
    /// Merged, closed and orphaned pull requests and those missing a gating
    /// label produce nothing.
    pub fn packages_in_pull_request(&self, pull: &PullRequest) -> Vec<PackageCandidate> {
        if pull.merged {
            warn!("Skipping pull request, already merged.");
            return Vec::new();
        }
        if !pull.is_open() {
            warn!(
                "Skipping pull request, no longer open (current state: {}).",
                pull.state
            );
            return Vec::new();
        }
        if pull.head.repo.is_none() {
            warn!("Skipping pull request, fork appears to have been deleted.");
            return Vec::new();
        }

        let Some(directives) = directives_from_labels(&pull.labels, &self.settings.filter_labels)
        else {
            warn!(
                "Skipping pull request, it is missing one of the required labels: {}.",
                self.settings.filter_labels.join(", ")
            );
            return Vec::new();
        };

        match_candidates(&self.settings.packages, &directives)
    }

    /// Packages of one pull request whose head branch still needs a bump
    ///
    /// `repository` is where the base branch lives. In dry run mode the
    /// results are only logged and an empty list is returned.
    pub async fn packages_to_bump(
        &self,
        repository: &RepoRef,
        pull: &PullRequest,
    ) -> anyhow::Result<Vec<PackageBumpResult>> {
        info!("Evaluating pull request #{}...", pull.number);

        let candidates = self.packages_in_pull_request(pull);
        let Some(head_repo) = pull.head.repo.clone() else {
            return Ok(Vec::new());
        };
        if candidates.is_empty() {
            debug!("No autobump labels on #{} match a configured package", pull.number);
            return Ok(Vec::new());
        }

        let base = ManifestSource {
            repo: pull.base.repo.clone().unwrap_or_else(|| repository.clone()),
            git_ref: pull.base.ref_name.clone(),
        };
        let head = ManifestSource {
            repo: head_repo,
            git_ref: pull.head.ref_name.clone(),
        };

        let mut tasks = JoinSet::new();
        for (index, candidate) in candidates.into_iter().enumerate() {
            let client = Arc::clone(&self.client);
            let base = base.clone();
            let head = head.clone();
            tasks.spawn(async move {
                let result =
                    check_if_bump_is_needed(client.as_ref(), &base, &head, candidate).await;
                (index, result)
            });
        }

        let mut checked = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined.context("Package evaluation task failed")?;
            let result = result
                .with_context(|| format!("Failed to evaluate pull request #{}", pull.number))?;
            checked.push((index, result));
        }
        checked.sort_by_key(|(index, _)| *index);
        let results: Vec<PackageBumpResult> =
            checked.into_iter().filter_map(|(_, result)| result).collect();

        if self.settings.dry_run && !results.is_empty() {
            let packages: Vec<String> = results.iter().map(ToString::to_string).collect();
            warn!(
                "Would have bumped packages {} for branch {}",
                packages.join(","),
                head.git_ref
            );
            return Ok(Vec::new());
        }

        Ok(results)
    }
}

/// Compare one candidate's base and head versions
///
/// Both manifests are read concurrently. A missing or unreadable manifest
/// skips the package; transport errors are returned.
async fn check_if_bump_is_needed<C: GitHubClient + ?Sized>(
    client: &C,
    base: &ManifestSource,
    head: &ManifestSource,
    candidate: PackageCandidate,
) -> anyhow::Result<Option<PackageBumpResult>> {
    let path = manifest_path(&candidate.path);
    let (base_version, head_version) = tokio::try_join!(
        package_version(client, base, &path),
        package_version(client, head, &path)
    )?;

    match evaluate(base_version.as_deref(), head_version.as_deref(), candidate.bump) {
        Ok(Some(target)) => {
            info!(
                "Package '{}' on branch '{}' needs a {} bump to {}",
                candidate.name, head.git_ref, candidate.bump, target
            );
            Ok(Some(candidate.into_result(target)))
        }
        Ok(None) => {
            info!(
                "Bump not needed for package '{}' on branch '{}': version {} already satisfies a {} bump from {}",
                candidate.name,
                head.git_ref,
                head_version.as_deref().unwrap_or_default(),
                candidate.bump,
                base_version.as_deref().unwrap_or_default()
            );
            Ok(None)
        }
        Err(e) => {
            warn!(
                "Skipping package '{}' on branch '{}' ({} against {}): {}",
                candidate.name, head.git_ref, head, base, e
            );
            Ok(None)
        }
    }
}

/// Version declared by the manifest at `path`, `None` when there is none
async fn package_version<C: GitHubClient + ?Sized>(
    client: &C,
    source: &ManifestSource,
    path: &str,
) -> anyhow::Result<Option<String>> {
    let content = client
        .fetch_file_contents(&source.repo.owner, &source.repo.name, &source.git_ref, path)
        .await
        .with_context(|| format!("Failed to read {} from {}", path, source))?;

    let Some(content) = content else {
        warn!("{} not found in {}", path, source);
        return Ok(None);
    };

    match read_version(&content) {
        Ok(version) => Ok(Some(version)),
        Err(e) => {
            warn!("Could not read the version of {} in {}: {}", path, source, e);
            Ok(None)
        }
    }
}
