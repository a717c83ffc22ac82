//! Conversion between nested trees and dotted-path leaf maps.
//!
//! Flattening walks mapping levels and joins keys with [`PATH_SEPARATOR`].
//! Sequences follow the configured [`ArrayPolicy`]: by default they are kept
//! whole as a single leaf, or they may be descended into with the element
//! index as the path segment.
//!
//! Unflattening resolves collisions last-write-wins in iteration order: an
//! intermediate segment that lands on a leaf replaces it with a mapping, and a
//! final segment overwrites whatever it lands on.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::tree::{Mapping, Tree};

/// Separator placed between mapping keys in a dotted path.
pub const PATH_SEPARATOR: char = '.';

/// Leaf map produced by [`flatten`], keyed by dotted path in walk order.
pub type FlattenedMap = IndexMap<String, Tree>;

/// How sequences participate in dotted paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayPolicy {
    /// A sequence is one opaque leaf under its parent's path.
    #[default]
    Atomic,
    /// Sequence elements receive index-suffixed paths such as `forms.0`.
    /// Empty sequences remain leaves.
    Indexed,
}

/// Flattens `tree` into dotted-path leaves.
///
/// Empty mappings below the root are kept as leaves so that they survive a
/// round trip. A root that is not a mapping becomes a single leaf stored at
/// the empty path.
///
/// # Examples
///
/// ```rust
/// use yamleo::{ArrayPolicy, Tree, flatten};
///
/// let tree: Tree = serde_json::from_str(r#"{"menu": {"open": "Open", "forms": ["a", "b"]}}"#)?;
///
/// let atomic = flatten(&tree, ArrayPolicy::Atomic);
/// assert_eq!(atomic.keys().collect::<Vec<_>>(), ["menu.open", "menu.forms"]);
///
/// let indexed = flatten(&tree, ArrayPolicy::Indexed);
/// assert_eq!(
///     indexed.keys().collect::<Vec<_>>(),
///     ["menu.open", "menu.forms.0", "menu.forms.1"],
/// );
/// # Ok::<_, serde_json::Error>(())
/// ```
#[must_use]
pub fn flatten(tree: &Tree, policy: ArrayPolicy) -> FlattenedMap {
    let mut leaves = FlattenedMap::new();
    walk(tree, None, policy, &mut leaves);
    leaves
}

fn walk(node: &Tree, prefix: Option<&str>, policy: ArrayPolicy, leaves: &mut FlattenedMap) {
    match node {
        Tree::Mapping(map) if !map.is_empty() => {
            for (key, child) in map {
                walk(child, Some(&join(prefix, key)), policy, leaves);
            }
        }
        Tree::Mapping(_) if prefix.is_none() => {}
        Tree::Sequence(items) if policy == ArrayPolicy::Indexed && !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                walk(child, Some(&join(prefix, &index.to_string())), policy, leaves);
            }
        }
        Tree::Scalar(_) | Tree::Sequence(_) | Tree::Mapping(_) => {
            leaves.insert(prefix.unwrap_or_default().to_owned(), node.clone());
        }
    }
}

fn join(prefix: Option<&str>, segment: &str) -> String {
    prefix.map_or_else(
        || segment.to_owned(),
        |parent| format!("{parent}{PATH_SEPARATOR}{segment}"),
    )
}

/// Rebuilds a tree from dotted-path leaves.
///
/// Entries apply in iteration order with last-write-wins collisions. Under
/// [`ArrayPolicy::Indexed`], any rebuilt mapping whose keys are exactly
/// `"0"`, `"1"`, … in order becomes a sequence again. That includes
/// mappings which were never sequences: `{"0": "zero", "1": "one"}` and
/// `["zero", "one"]` flatten to the same paths, so only the sequence shape
/// survives an indexed round trip.
///
/// # Examples
///
/// ```rust
/// use yamleo::{ArrayPolicy, FlattenedMap, Tree, unflatten};
///
/// let mut leaves = FlattenedMap::new();
/// leaves.insert("menu.open".to_owned(), Tree::from("Open"));
/// leaves.insert("menu".to_owned(), Tree::from("Menu"));
///
/// // `menu` was written last, so it replaces the nested mapping.
/// let tree = unflatten(&leaves, ArrayPolicy::Atomic);
/// let menu = tree.as_mapping().and_then(|root| root.get("menu"));
/// assert_eq!(menu.and_then(Tree::as_str), Some("Menu"));
/// ```
#[must_use]
pub fn unflatten(leaves: &FlattenedMap, policy: ArrayPolicy) -> Tree {
    let mut root = Tree::empty();
    for (path, value) in leaves {
        if path.is_empty() {
            root = value.clone();
        } else {
            insert_path(&mut root, path.split(PATH_SEPARATOR), value.clone());
        }
    }
    match policy {
        ArrayPolicy::Atomic => root,
        ArrayPolicy::Indexed => restore_sequences(root),
    }
}

fn insert_path<'a>(node: &mut Tree, mut segments: impl Iterator<Item = &'a str>, value: Tree) {
    let Some(segment) = segments.next() else {
        *node = value;
        return;
    };
    if !node.is_mapping() {
        *node = Tree::empty();
    }
    let Tree::Mapping(map) = node else {
        return;
    };
    let child = map.entry(segment.to_owned()).or_insert_with(Tree::empty);
    insert_path(child, segments, value);
}

fn restore_sequences(node: Tree) -> Tree {
    let Tree::Mapping(map) = node else {
        return node;
    };
    let rebuilt: Mapping = map
        .into_iter()
        .map(|(key, child)| (key, restore_sequences(child)))
        .collect();
    let is_indexed = !rebuilt.is_empty()
        && rebuilt
            .keys()
            .enumerate()
            .all(|(index, key)| *key == index.to_string());
    if is_indexed {
        Tree::Sequence(rebuilt.into_values().collect())
    } else {
        Tree::Mapping(rebuilt)
    }
}

#[cfg(test)]
mod tests;
