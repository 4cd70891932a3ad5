//! Bump-needed decision
//!
//! Compares the version on the base branch with the version on the head
//! branch of a pull request and decides whether the requested bump still has
//! to happen. Re-running the decision after the head branch reached the
//! target is a no-op, so repeated pushes never ask for a second bump.

use crate::bump::BumpKind;
use crate::version::SemanticVersion;
use std::fmt;
use thiserror::Error;

/// Which side of the pull request a version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSide {
    Base,
    Head,
}

impl fmt::Display for VersionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSide::Base => f.write_str("base"),
            VersionSide::Head => f.write_str("head"),
        }
    }
}

/// Why a package could not be evaluated
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("no {side} version available")]
    Missing { side: VersionSide },

    #[error("{side} version '{value}' is not a valid semantic version: {source}")]
    Invalid {
        side: VersionSide,
        value: String,
        #[source]
        source: semver::Error,
    },
}

/// Decide whether `bump` still has to be applied
///
/// Returns the target version when the head branch is behind it, `None` when
/// the head branch already sits on or past the target.
pub fn decide(
    base: SemanticVersion,
    head: SemanticVersion,
    bump: BumpKind,
) -> Option<SemanticVersion> {
    let target = base.next(bump);
    (target > head).then_some(target)
}

/// Same as [`decide`], starting from raw version strings
///
/// Absent or unparsable versions are reported as a [`VersionError`] so the
/// caller can skip the package instead of failing the run.
pub fn evaluate(
    base: Option<&str>,
    head: Option<&str>,
    bump: BumpKind,
) -> Result<Option<SemanticVersion>, VersionError> {
    let base = parse_side(base, VersionSide::Base)?;
    let head = parse_side(head, VersionSide::Head)?;
    Ok(decide(base, head, bump))
}

fn parse_side(value: Option<&str>, side: VersionSide) -> Result<SemanticVersion, VersionError> {
    let value = value.ok_or(VersionError::Missing { side })?;
    value.parse().map_err(|source| VersionError::Invalid {
        side,
        value: value.to_string(),
        source,
    })
}
