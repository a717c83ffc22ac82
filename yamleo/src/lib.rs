//! Structural engines for hierarchical translation catalogs.
//!
//! A catalog is a YAML or JSON document whose root is a mapping of nested
//! keys ending in translated strings. This crate parses catalogs into a
//! [`Tree`] and offers the operations a localisation workflow needs:
//!
//! - [`flatten`] and [`unflatten`] convert between trees and dotted-path
//!   leaf maps.
//! - [`compare`] reports keys missing on either side and likely duplicates.
//! - [`Merger`] adds keys the target lacks, tagged for a translator.
//! - [`sort`] orders every mapping level by key.
//!
//! File access lives in [`catalog`]; everything else is pure and operates on
//! in-memory trees.

pub mod catalog;
mod diff;
mod duplicates;
mod flatten;
mod merge;
mod sort;
mod tree;

pub use catalog::{CatalogError, CatalogResult};
pub use diff::{ComparisonReport, compare, missing_keys};
pub use duplicates::{
    GROUP_SEPARATOR, duplicate_raw_keys, duplicate_values, duplicates, normalise_value,
};
pub use flatten::{ArrayPolicy, FlattenedMap, PATH_SEPARATOR, flatten, unflatten};
pub use merge::{DEFAULT_MARKER, Merger, merge_keys};
pub use sort::sort;
pub use tree::{Mapping, Scalar, Tree};
