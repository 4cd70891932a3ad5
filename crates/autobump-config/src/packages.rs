//! Parsers for list-valued settings

use crate::config::ConfigError;
use autobump_core::PackageDescriptor;
use std::collections::HashSet;

/// Parse `name|path;name|path` into package descriptors
///
/// Blank input means no packages and blank entries (a stray `;`) are
/// skipped. Names must be unique.
pub fn parse_packages(raw: &str) -> Result<Vec<PackageDescriptor>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, path) = entry
                .split_once('|')
                .ok_or_else(|| ConfigError::InvalidPackage(entry.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::InvalidPackage(entry.to_string()));
            }
            if !seen.insert(name.to_string()) {
                return Err(ConfigError::DuplicatePackage(name.to_string()));
            }
            Ok(PackageDescriptor::new(name, path.trim()))
        })
        .collect()
}

/// Parse a comma-separated label list, dropping blanks
pub fn parse_filter_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect()
}
