//! Missing-key computation and the two-catalog comparison report.

use serde::{Deserialize, Serialize};

use crate::duplicates::{duplicate_raw_keys, duplicate_values};
use crate::flatten::{ArrayPolicy, flatten};
use crate::tree::Tree;

/// Outcome of comparing a base catalog against a target catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    /// Paths present in base but absent from target.
    pub missing_in_target: Vec<String>,
    /// Paths present in target but absent from base.
    pub missing_in_base: Vec<String>,
    /// Raw duplicate keys of base, then duplicate-value groups of base.
    pub duplicates_in_base: Vec<String>,
    /// Raw duplicate keys of target, then duplicate-value groups of target.
    pub duplicates_in_target: Vec<String>,
}

impl ComparisonReport {
    /// Returns `true` when no field reports anything.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.missing_in_target.is_empty()
            && self.missing_in_base.is_empty()
            && self.duplicates_in_base.is_empty()
            && self.duplicates_in_target.is_empty()
    }
}

/// Returns base's dotted paths, in base order, that target does not define.
///
/// Only path membership matters: a path present on both sides is never
/// missing, whatever its value or shape on either side.
///
/// # Examples
///
/// ```rust
/// use yamleo::{ArrayPolicy, Tree, missing_keys};
///
/// let base: Tree = serde_json::from_str(r#"{"a": {"b": "x"}, "c": "y"}"#)?;
/// let target: Tree = serde_json::from_str(r#"{"a": {"b": "x"}}"#)?;
/// assert_eq!(missing_keys(&base, &target, ArrayPolicy::Atomic), ["c"]);
/// assert!(missing_keys(&target, &base, ArrayPolicy::Atomic).is_empty());
/// # Ok::<_, serde_json::Error>(())
/// ```
#[must_use]
pub fn missing_keys(base: &Tree, target: &Tree, policy: ArrayPolicy) -> Vec<String> {
    let target_leaves = flatten(target, policy);
    flatten(base, policy)
        .into_keys()
        .filter(|path| !target_leaves.contains_key(path))
        .collect()
}

/// Compares two parsed catalogs together with their raw text.
///
/// Duplicate fields concatenate the raw-key scan and the value grouping of
/// the same catalog; they are not deduplicated against each other.
#[must_use]
pub fn compare(
    base: &Tree,
    target: &Tree,
    base_raw: &str,
    target_raw: &str,
    policy: ArrayPolicy,
) -> ComparisonReport {
    let mut duplicates_in_base = duplicate_raw_keys(base_raw);
    duplicates_in_base.extend(duplicate_values(base, policy));
    let mut duplicates_in_target = duplicate_raw_keys(target_raw);
    duplicates_in_target.extend(duplicate_values(target, policy));

    ComparisonReport {
        missing_in_target: missing_keys(base, target, policy),
        missing_in_base: missing_keys(target, base, policy),
        duplicates_in_base,
        duplicates_in_target,
    }
}
