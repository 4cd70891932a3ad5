//! Label parsing
//!
//! Labels look like `autobump-<bump>` or `autobump-<package>-<bump>`. The short
//! form targets the package named [`DEFAULT_PACKAGE_NAME`].

use crate::bump::BumpKind;
use serde::{Deserialize, Serialize};

/// First segment every autobump label starts with
pub const LABEL_PREFIX: &str = "autobump";

/// Package targeted by the two-part label form
pub const DEFAULT_PACKAGE_NAME: &str = "default";

const SEPARATOR: char = '-';

/// A bump requested for one package by one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoBumpDirective {
    pub package_name: String,
    pub bump: BumpKind,
}

/// Parse a single label, `None` when it is not an autobump directive
pub fn parse_label(label: &str) -> Option<AutoBumpDirective> {
    let parts: Vec<&str> = label.split(SEPARATOR).collect();
    let (prefix, package_name, bump) = match parts.as_slice() {
        [prefix, bump] => (*prefix, DEFAULT_PACKAGE_NAME, *bump),
        [prefix, package_name, bump] => (*prefix, *package_name, *bump),
        _ => return None,
    };

    if prefix != LABEL_PREFIX {
        return None;
    }

    let bump = bump.parse().ok()?;
    Some(AutoBumpDirective {
        package_name: package_name.to_string(),
        bump,
    })
}
