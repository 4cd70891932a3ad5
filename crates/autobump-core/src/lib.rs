//! Bump rules for autobump
//!
//! This crate holds everything about autobump that does not touch the network:
//!
//! - Turning a pull request label into a bump directive
//! - Joining directives against the configured packages
//! - Computing the next semantic version and deciding whether it is still needed
//! - Formatting the final plan for the Actions output channel
//!
//! # Example
//!
//! ```rust
//! use autobump_core::{decide, parse_label, BumpKind, SemanticVersion};
//!
//! let directive = parse_label("autobump-domain-minor").unwrap();
//! assert_eq!(directive.package_name, "domain");
//! assert_eq!(directive.bump, BumpKind::Minor);
//!
//! let base: SemanticVersion = "1.2.3".parse().unwrap();
//! let head: SemanticVersion = "1.2.3".parse().unwrap();
//! assert_eq!(decide(base, head, directive.bump), Some("1.3.0".parse().unwrap()));
//! ```

pub mod bump;
pub mod decision;
pub mod label;
pub mod manifest;
pub mod matcher;
pub mod package;
pub mod plan;
pub mod version;

pub use bump::{BumpKind, ParseBumpKindError};
pub use decision::{decide, evaluate, VersionError, VersionSide};
pub use label::{parse_label, AutoBumpDirective, DEFAULT_PACKAGE_NAME, LABEL_PREFIX};
pub use manifest::{manifest_path, read_version, ManifestError, MANIFEST_FILE};
pub use matcher::{directives_from_labels, has_required_labels, match_candidates};
pub use package::{PackageBumpResult, PackageCandidate, PackageDescriptor};
pub use plan::BumpPlan;
pub use version::SemanticVersion;
