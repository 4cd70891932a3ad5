//! Configuration for autobump
//!
//! This crate provides:
//! - The `Config` struct, built once at startup and passed down explicitly
//! - Parsing of the `PACKAGES_IN_REPO` and `FILTER_LABELS` formats
//! - Optional `.env` loading for local runs

pub mod config;
pub mod env;
pub mod packages;

pub use config::{Config, ConfigError};
pub use env::{load_dotenv, DotenvStatus};
pub use packages::{parse_filter_labels, parse_packages};
