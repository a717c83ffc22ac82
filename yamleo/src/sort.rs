//! Deterministic key ordering.

use crate::tree::{Mapping, Tree};

/// Returns a copy of `tree` with the keys of every mapping in code-point order.
///
/// Sequence order is preserved; each element is sorted recursively. The
/// ordering is plain `str` comparison, so it does not depend on locale or
/// platform.
///
/// # Examples
///
/// ```rust
/// use yamleo::{Tree, sort};
///
/// let tree: Tree = serde_json::from_str(r#"{"b": 1, "a": {"d": 2, "c": 3}}"#)?;
/// let sorted = sort(&tree);
/// assert_eq!(sorted.to_text(), r#"{"a":{"c":3,"d":2},"b":1}"#);
/// # Ok::<_, serde_json::Error>(())
/// ```
#[must_use]
pub fn sort(tree: &Tree) -> Tree {
    match tree {
        Tree::Scalar(_) => tree.clone(),
        Tree::Sequence(items) => Tree::Sequence(items.iter().map(sort).collect()),
        Tree::Mapping(map) => {
            let mut sorted: Mapping = map
                .iter()
                .map(|(key, child)| (key.clone(), sort(child)))
                .collect();
            sorted.sort_unstable_keys();
            Tree::Mapping(sorted)
        }
    }
}
