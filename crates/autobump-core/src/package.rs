//! Package records flowing through one evaluation

use crate::bump::BumpKind;
use crate::version::SemanticVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A package configured in the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Unique name, matched against label directives
    pub name: String,

    /// Directory of the package manifest, relative to the repository root
    pub path: String,
}

impl PackageDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn with_bump(&self, bump: BumpKind) -> PackageCandidate {
        PackageCandidate {
            name: self.name.clone(),
            path: self.path.clone(),
            bump,
        }
    }
}

/// A package a pull request asked to bump, not yet checked against versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageCandidate {
    pub name: String,
    pub path: String,
    pub bump: BumpKind,
}

impl PackageCandidate {
    pub fn into_result(self, version: SemanticVersion) -> PackageBumpResult {
        PackageBumpResult {
            name: self.name,
            path: self.path,
            bump: self.bump,
            version: version.to_string(),
        }
    }
}

/// A package that needs bumping, with the version it should move to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageBumpResult {
    pub name: String,
    pub path: String,
    pub bump: BumpKind,
    pub version: String,
}

impl fmt::Display for PackageBumpResult {
    /// `name|path|bump|version`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}|{}", self.name, self.path, self.bump, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_into_result() {
        let result = PackageDescriptor::new("domain", "packages/domain")
            .with_bump(BumpKind::Minor)
            .into_result(SemanticVersion::new(1, 3, 0));

        assert_eq!(result.name, "domain");
        assert_eq!(result.path, "packages/domain");
        assert_eq!(result.bump, BumpKind::Minor);
        assert_eq!(result.version, "1.3.0");
        assert_eq!(result.to_string(), "domain|packages/domain|minor|1.3.0");
    }
}
