//! Target-preserving merge of a base catalog into a target catalog.
//!
//! The target always wins wherever it supplies a value, whatever the shapes
//! on either side. Base-only subtrees are copied in with their string leaves
//! rewritten so reviewers can find them by searching for the marker.

use crate::tree::{Mapping, Scalar, Tree};

/// Marker appended to string leaves copied from the base catalog.
pub const DEFAULT_MARKER: &str = " TMP";

/// Merge engine configured with the marker used for copied leaves.
///
/// # Examples
///
/// ```rust
/// use yamleo::{Merger, Tree};
///
/// let base: Tree = serde_json::from_str(r#"{"title": "Shop", "cart": {"empty": "Empty"}}"#)?;
/// let target: Tree = serde_json::from_str(r#"{"title": "Boutique"}"#)?;
///
/// let merged = Merger::new(" [todo]").merge(&base, &target);
/// let expected: Tree =
///     serde_json::from_str(r#"{"title": "Boutique", "cart": {"empty": "empty [todo]"}}"#)?;
/// assert_eq!(merged, expected);
/// # Ok::<_, serde_json::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Merger {
    marker: String,
}

impl Default for Merger {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl Merger {
    /// Creates a merger that appends `marker` to copied leaves.
    #[must_use]
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Returns the configured marker.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Merges `base` into `target`, returning a new tree.
    #[must_use]
    pub fn merge(&self, base: &Tree, target: &Tree) -> Tree {
        self.merge_node(base, Some(target))
    }

    fn merge_node(&self, base: &Tree, target: Option<&Tree>) -> Tree {
        match (base, target) {
            (Tree::Scalar(_), Some(existing)) => existing.clone(),
            (Tree::Scalar(_), None) => self.mark_unkeyed(base),
            // Sequences are never merged element by element.
            (Tree::Sequence(_), Some(existing)) => existing.clone(),
            (Tree::Mapping(base_map), Some(Tree::Mapping(target_map))) => {
                Tree::Mapping(self.merge_mappings(base_map, target_map))
            }
            (Tree::Mapping(_), Some(existing)) => existing.clone(),
            (Tree::Sequence(_) | Tree::Mapping(_), None) => self.mark_unkeyed(base),
        }
    }

    fn merge_mappings(&self, base: &Mapping, target: &Mapping) -> Mapping {
        let mut merged = target.clone();
        for (key, base_value) in base {
            let value = match target.get(key) {
                Some(existing) => self.merge_node(base_value, Some(existing)),
                None => self.mark_keyed(key, base_value),
            };
            merged.insert(key.clone(), value);
        }
        merged
    }

    /// Marks a leaf using its own text.
    #[must_use]
    pub fn mark_leaf_by_value(&self, value: &str) -> String {
        format!("{value}{}", self.marker)
    }

    /// Marks a leaf using the name of the key it sits under.
    #[must_use]
    pub fn mark_leaf_by_key(&self, key: &str) -> String {
        format!("{key}{}", self.marker)
    }

    /// Marks a subtree reached through the mapping key `key`.
    fn mark_keyed(&self, key: &str, tree: &Tree) -> Tree {
        match tree {
            Tree::Scalar(Scalar::String(_)) => Tree::from(self.mark_leaf_by_key(key)),
            Tree::Scalar(_) | Tree::Sequence(_) | Tree::Mapping(_) => self.mark_children(tree),
        }
    }

    /// Marks a subtree with no key in scope: a bare root or a sequence element.
    fn mark_unkeyed(&self, tree: &Tree) -> Tree {
        match tree {
            Tree::Scalar(Scalar::String(value)) => Tree::from(self.mark_leaf_by_value(value)),
            Tree::Scalar(_) | Tree::Sequence(_) | Tree::Mapping(_) => self.mark_children(tree),
        }
    }

    fn mark_children(&self, tree: &Tree) -> Tree {
        match tree {
            Tree::Mapping(map) => Tree::Mapping(
                map.iter()
                    .map(|(key, child)| (key.clone(), self.mark_keyed(key, child)))
                    .collect(),
            ),
            Tree::Sequence(items) => {
                Tree::Sequence(items.iter().map(|item| self.mark_unkeyed(item)).collect())
            }
            Tree::Scalar(_) => tree.clone(),
        }
    }
}

/// Merges `base` into `target` using [`DEFAULT_MARKER`].
///
/// # Examples
///
/// ```rust
/// use yamleo::{Tree, merge_keys};
///
/// let base: Tree = serde_json::from_str(r#"{"x": "hello"}"#)?;
/// let merged = merge_keys(&base, &Tree::empty());
/// let expected: Tree = serde_json::from_str(r#"{"x": "x TMP"}"#)?;
/// assert_eq!(merged, expected);
/// # Ok::<_, serde_json::Error>(())
/// ```
#[must_use]
pub fn merge_keys(base: &Tree, target: &Tree) -> Tree {
    Merger::default().merge(base, target)
}
