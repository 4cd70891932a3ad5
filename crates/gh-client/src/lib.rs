//! GitHub access for autobump
//!
//! Everything the bump logic needs from GitHub goes through the
//! [`GitHubClient`] trait:
//!
//! - [`OctocrabClient`] calls the REST API (public GitHub or Enterprise)
//! - [`CachedGitHubClient`] decorates another client and answers repeated
//!   manifest reads from memory
//! - [`PullRequestPages`] pulls the open pull request listing page by page
//!
//! ```rust,no_run
//! use gh_client::{CachedGitHubClient, GitHubClient, OctocrabClient, PullRequestPages};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = CachedGitHubClient::new(OctocrabClient::connect(
//!     "token",
//!     gh_client::DEFAULT_API_URL,
//! )?);
//!
//! let mut pages = PullRequestPages::new(&client, "octo", "monorepo", "main");
//! while let Some(page) = pages.next_page().await? {
//!     for pr in page {
//!         let manifest = client
//!             .fetch_file_contents("octo", "monorepo", &pr.head.ref_name, "package.json")
//!             .await?;
//!         println!("#{}: {:?}", pr.number, manifest.map(|m| m.len()));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod cached_client;
pub mod client;
pub mod octocrab_client;
pub mod pages;
pub mod types;

/// Public GitHub REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub use cached_client::CachedGitHubClient;
pub use client::GitHubClient;
pub use octocrab_client::OctocrabClient;
pub use pages::{PullRequestPages, PER_PAGE};
pub use types::{BranchRef, PullRequest, PullRequestState, RepoRef};
