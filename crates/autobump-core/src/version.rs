//! Semantic versions and the next-version rule

use crate::bump::BumpKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `major.minor.patch` triple
///
/// Pre-release and build metadata are dropped on parse. Ordering compares
/// major, then minor, then patch, which is what the derived `Ord` does with
/// the fields in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The version a bump of the given kind lands on
    pub fn next(&self, bump: BumpKind) -> Self {
        match bump {
            BumpKind::Major => Self::new(self.major + 1, 0, 0),
            BumpKind::Minor => Self::new(self.major, self.minor + 1, 0),
            BumpKind::Patch => Self::new(self.major, self.minor, self.patch + 1),
        }
    }
}

impl From<&semver::Version> for SemanticVersion {
    fn from(version: &semver::Version) -> Self {
        Self::new(version.major, version.minor, version.patch)
    }
}

impl FromStr for SemanticVersion {
    type Err = semver::Error;

    /// Accepts surrounding whitespace and a single leading `v`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        semver::Version::parse(trimmed).map(|v| SemanticVersion::from(&v))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
