//! Application configuration
//!
//! Read once from environment-style key/value pairs at startup. Nothing else
//! in autobump looks at the process environment.

use crate::env;
use crate::packages::{parse_filter_labels, parse_packages};
use autobump_core::PackageDescriptor;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors, all fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable '{0}' was not provided, please define it and try again.")]
    Missing(&'static str),

    #[error("Invalid package entry '{0}', expected 'name|path'")]
    InvalidPackage(String),

    #[error("Package '{0}' is configured more than once")]
    DuplicatePackage(String),
}

/// Configuration for one autobump run
#[derive(Clone)]
pub struct Config {
    /// API credential, only handed to the GitHub client
    pub github_token: String,

    /// Compute decisions but report nothing
    pub dry_run: bool,

    /// Every package the matcher considers, in configuration order
    pub packages: Vec<PackageDescriptor>,

    /// Labels that must all be on a pull request before it is evaluated
    pub filter_labels: Vec<String>,

    /// Name of the event that triggered the workflow
    pub event_name: String,

    /// JSON payload of the triggering event
    pub event_path: PathBuf,

    /// Output file of the step, if the runner provides one
    pub output_path: Option<PathBuf>,

    /// REST API base URL
    pub api_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &"***")
            .field("dry_run", &self.dry_run)
            .field("packages", &self.packages)
            .field("filter_labels", &self.filter_labels)
            .field("event_name", &self.event_name)
            .field("event_path", &self.event_path)
            .field("output_path", &self.output_path)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config = Self {
            github_token: required(env::GITHUB_TOKEN)?,
            dry_run: lookup(env::DRY_RUN).is_some_and(|value| value.trim() == "true"),
            packages: parse_packages(&required(env::PACKAGES_IN_REPO)?)?,
            filter_labels: lookup(env::FILTER_LABELS)
                .map(|raw| parse_filter_labels(&raw))
                .unwrap_or_default(),
            event_name: required(env::GITHUB_EVENT_NAME)?,
            event_path: PathBuf::from(required(env::GITHUB_EVENT_PATH)?),
            output_path: optional(env::GITHUB_OUTPUT).map(PathBuf::from),
            api_url: optional(env::GITHUB_API_URL)
                .unwrap_or_else(|| env::DEFAULT_API_URL.to_string()),
        };

        log::debug!("Loaded config: {:?}", config);
        Ok(config)
    }
}
