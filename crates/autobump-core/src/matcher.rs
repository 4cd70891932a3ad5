//! Package matching
//!
//! Turns the labels on a pull request into the list of packages that are
//! candidates for a bump.

use crate::label::{parse_label, AutoBumpDirective};
use crate::package::{PackageCandidate, PackageDescriptor};
use log::warn;

/// Whether every gating label is present on the pull request
///
/// An empty gate always passes.
pub fn has_required_labels<S: AsRef<str>>(labels: &[S], required: &[String]) -> bool {
    required
        .iter()
        .all(|needed| labels.iter().any(|label| label.as_ref() == needed))
}

/// Parse every label, keeping the ones that are autobump directives
///
/// Returns `None` when the gating labels are not all present, in which case
/// the pull request must be skipped entirely.
pub fn directives_from_labels<S: AsRef<str>>(
    labels: &[S],
    required: &[String],
) -> Option<Vec<AutoBumpDirective>> {
    if !has_required_labels(labels, required) {
        return None;
    }

    Some(labels.iter().filter_map(|label| parse_label(label.as_ref())).collect())
}

/// Pair each configured package with the first directive naming it
///
/// Output follows the order of `packages`. Packages without a directive are
/// left out, and directives naming unknown packages are ignored.
pub fn match_candidates(
    packages: &[PackageDescriptor],
    directives: &[AutoBumpDirective],
) -> Vec<PackageCandidate> {
    packages
        .iter()
        .filter_map(|package| {
            let mut matching = directives.iter().filter(|d| d.package_name == package.name);
            let first = matching.next()?;

            if matching.any(|other| other.bump != first.bump) {
                warn!(
                    "Conflicting autobump labels for package '{}', using the first one ({})",
                    package.name, first.bump
                );
            }

            Some(package.with_bump(first.bump))
        })
        .collect()
}
