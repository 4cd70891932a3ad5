//! Bump plan
//!
//! The outcome of one event: packages to bump, grouped by the head branch of
//! the pull request that asked for them.

use crate::package::PackageBumpResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Packages to bump per branch, in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpPlan {
    branches: IndexMap<String, Vec<PackageBumpResult>>,
}

impl BumpPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record results for a branch
    ///
    /// Empty result lists leave the plan untouched so branches with nothing to
    /// do never appear in the output.
    pub fn extend_branch(&mut self, branch: impl Into<String>, results: Vec<PackageBumpResult>) {
        if results.is_empty() {
            return;
        }
        self.branches.entry(branch.into()).or_default().extend(results);
    }

    pub fn get(&self, branch: &str) -> Option<&[PackageBumpResult]> {
        self.branches.get(branch).map(Vec::as_slice)
    }

    pub fn branches(&self) -> impl Iterator<Item = (&str, &[PackageBumpResult])> {
        self.branches
            .iter()
            .map(|(branch, results)| (branch.as_str(), results.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Number of packages across all branches
    pub fn package_count(&self) -> usize {
        self.branches.values().map(Vec::len).sum()
    }
}

impl fmt::Display for BumpPlan {
    /// `branch:name|path|bump|version;...` per branch, joined by `#`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (branch, results)) in self.branches.iter().enumerate() {
            if index > 0 {
                f.write_str("#")?;
            }
            write!(f, "{}:", branch)?;
            for (position, result) in results.iter().enumerate() {
                if position > 0 {
                    f.write_str(";")?;
                }
                write!(f, "{}", result)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bump::BumpKind;

    fn result(name: &str, path: &str, bump: BumpKind, version: &str) -> PackageBumpResult {
        PackageBumpResult {
            name: name.to_string(),
            path: path.to_string(),
            bump,
            version: version.to_string(),
        }
    }

    #[test]
    fn test_empty_plan_formats_as_empty_string() {
        let plan = BumpPlan::new();
        assert!(plan.is_empty());
        assert_eq!(plan.to_string(), "");
    }

    #[test]
    fn test_format_multiple_branches() {
        let mut plan = BumpPlan::new();
        plan.extend_branch(
            "feature-one",
            vec![result("default", "", BumpKind::Minor, "1.3.0")],
        );
        plan.extend_branch(
            "feature-two",
            vec![
                result("default", "", BumpKind::Minor, "1.3.0"),
                result("contracts", "packages/contracts", BumpKind::Major, "4.0.0"),
            ],
        );

        assert_eq!(
            plan.to_string(),
            "feature-one:default||minor|1.3.0#feature-two:default||minor|1.3.0;contracts|packages/contracts|major|4.0.0"
        );
        assert_eq!(plan.package_count(), 3);
    }

    #[test]
    fn test_empty_results_do_not_create_branch() {
        let mut plan = BumpPlan::new();
        plan.extend_branch("feature", vec![]);
        assert!(plan.is_empty());
        assert_eq!(plan.get("feature"), None);
    }

    #[test]
    fn test_same_branch_accumulates() {
        let mut plan = BumpPlan::new();
        plan.extend_branch("feature", vec![result("default", "", BumpKind::Patch, "1.0.1")]);
        plan.extend_branch("feature", vec![result("domain", "d", BumpKind::Patch, "2.0.1")]);

        assert_eq!(plan.get("feature").map(<[_]>::len), Some(2));
        assert_eq!(plan.branches().count(), 1);
    }
}
