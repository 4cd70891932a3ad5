//! Bump kinds
//!
//! The closed set of version increments a label can request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which component of a semantic version to increment
///
/// Variants are declared from least to most severe so the derived ordering
/// reads naturally (`Patch < Minor < Major`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
    Patch,
    Minor,
    Major,
}

impl BumpKind {
    /// All bump kinds, most severe first
    pub const ALL: [BumpKind; 3] = [BumpKind::Major, BumpKind::Minor, BumpKind::Patch];

    /// The literal used in labels and in the output channel
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not exactly one of `major`, `minor` or `patch`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a bump kind, expected one of 'major', 'minor' or 'patch'")]
pub struct ParseBumpKindError(pub String);

impl FromStr for BumpKind {
    type Err = ParseBumpKindError;

    /// Case-sensitive: `"Major"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BumpKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseBumpKindError(s.to_string()))
    }
}
