//! Environment variable names and `.env` loading

use std::path::PathBuf;

pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const DRY_RUN: &str = "DRY_RUN";
pub const PACKAGES_IN_REPO: &str = "PACKAGES_IN_REPO";
pub const FILTER_LABELS: &str = "FILTER_LABELS";
pub const GITHUB_EVENT_NAME: &str = "GITHUB_EVENT_NAME";
pub const GITHUB_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";
pub const GITHUB_API_URL: &str = "GITHUB_API_URL";

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// What happened when looking for a `.env` file
#[derive(Debug)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    NotFound,
    Failed(dotenvy::Error),
}

impl DotenvStatus {
    fn from_result(result: dotenvy::Result<PathBuf>) -> Self {
        match result {
            Ok(path) => DotenvStatus::Loaded(path),
            Err(e) if e.not_found() => DotenvStatus::NotFound,
            Err(e) => DotenvStatus::Failed(e),
        }
    }

    /// Report the outcome, once a logger is installed
    pub fn log(&self) {
        match self {
            DotenvStatus::Loaded(path) => {
                log::debug!("Loaded environment from {}", path.display())
            }
            DotenvStatus::NotFound => log::debug!("No .env file found"),
            DotenvStatus::Failed(e) => log::warn!("Failed to load .env file: {}", e),
        }
    }
}

/// Load a `.env` file from the working directory, if there is one
///
/// Variables already set in the process environment win over the file. Call
/// this before initializing logging so a `RUST_LOG` from the file applies.
pub fn load_dotenv() -> DotenvStatus {
    DotenvStatus::from_result(dotenvy::dotenv())
}
