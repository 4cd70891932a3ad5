//! Package manifest handling
//!
//! Packages are npm-style: the version lives in the top-level `version`
//! field of `package.json` inside the package directory.

use serde::Deserialize;
use thiserror::Error;

/// Manifest file name inside every package directory
pub const MANIFEST_FILE: &str = "package.json";

/// Errors reading a version out of a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("manifest has no \"version\" field")]
    MissingVersion,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    version: Option<serde_json::Value>,
}

/// Repository-relative path of the manifest for a package directory
pub fn manifest_path(package_path: &str) -> String {
    let dir = package_path.trim_matches('/');
    if dir.is_empty() {
        MANIFEST_FILE.to_string()
    } else {
        format!("{}/{}", dir, MANIFEST_FILE)
    }
}

/// Extract the `version` string from manifest content
pub fn read_version(content: &str) -> Result<String, ManifestError> {
    let manifest: Manifest = serde_json::from_str(content)?;
    match manifest.version {
        Some(serde_json::Value::String(version)) => Ok(version),
        _ => Err(ManifestError::MissingVersion),
    }
}
