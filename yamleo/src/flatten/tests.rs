//! Flattening and unflattening behaviour, including the array policy and
//! collision resolution.

use rstest::rstest;

use super::*;
use crate::tree::Scalar;

fn yaml(text: &str) -> Tree {
    serde_yaml::from_str(text).expect("valid YAML fixture")
}

fn paths(leaves: &FlattenedMap) -> Vec<&str> {
    leaves.keys().map(String::as_str).collect()
}

#[rstest]
fn nested_mappings_join_keys_with_dots() {
    let tree = yaml("nav:\n  home: Home\n  account:\n    login: Log in\ntitle: Shop");
    let leaves = flatten(&tree, ArrayPolicy::Atomic);
    assert_eq!(paths(&leaves), ["nav.home", "nav.account.login", "title"]);
    assert_eq!(
        leaves.get("nav.account.login").and_then(Tree::as_str),
        Some("Log in")
    );
}

#[rstest]
fn atomic_policy_keeps_sequences_whole() {
    let tree = yaml("plural:\n  - one apple\n  - many apples");
    let leaves = flatten(&tree, ArrayPolicy::Atomic);
    assert_eq!(paths(&leaves), ["plural"]);
    assert!(matches!(leaves.get("plural"), Some(Tree::Sequence(items)) if items.len() == 2));
}

#[rstest]
fn indexed_policy_descends_into_sequences() {
    let tree = yaml("plural:\n  - one apple\n  - name: many\nnone: []");
    let leaves = flatten(&tree, ArrayPolicy::Indexed);
    assert_eq!(paths(&leaves), ["plural.0", "plural.1.name", "none"]);
}

#[rstest]
fn empty_mappings_below_root_are_leaves() {
    let tree = yaml("pending: {}\nroot: value");
    let leaves = flatten(&tree, ArrayPolicy::Atomic);
    assert_eq!(paths(&leaves), ["pending", "root"]);
    assert_eq!(unflatten(&leaves, ArrayPolicy::Atomic), tree);
}

#[rstest]
fn empty_root_flattens_to_nothing() {
    assert!(flatten(&Tree::empty(), ArrayPolicy::Atomic).is_empty());
}

#[rstest]
fn scalar_root_uses_the_empty_path() {
    let tree = Tree::from("lonely");
    let leaves = flatten(&tree, ArrayPolicy::Atomic);
    assert_eq!(paths(&leaves), [""]);
    assert_eq!(unflatten(&leaves, ArrayPolicy::Atomic), tree);
}

#[rstest]
#[case("a:\n  b:\n    c: deep\n  d: shallow\ne: top")]
#[case("single: value")]
#[case("numbers:\n  int: 3\n  float: 1.5\n  flag: true\n  nothing: ~")]
fn mapping_only_trees_round_trip(#[case] text: &str) {
    let tree = yaml(text);
    assert_eq!(
        unflatten(&flatten(&tree, ArrayPolicy::Atomic), ArrayPolicy::Atomic),
        tree
    );
}

#[rstest]
#[case(ArrayPolicy::Atomic)]
#[case(ArrayPolicy::Indexed)]
fn trees_with_sequences_round_trip(#[case] policy: ArrayPolicy) {
    let tree = yaml("forms:\n  - one\n  - other\nlist:\n  - name: a\n  - name: b\nempty: []");
    assert_eq!(unflatten(&flatten(&tree, policy), policy), tree);
}

#[rstest]
fn later_prefix_replaces_earlier_leaf() {
    let mut leaves = FlattenedMap::new();
    leaves.insert("menu".to_owned(), Tree::from("Menu"));
    leaves.insert("menu.open".to_owned(), Tree::from("Open"));
    assert_eq!(unflatten(&leaves, ArrayPolicy::Atomic), yaml("menu:\n  open: Open"));
}

#[rstest]
fn later_leaf_replaces_earlier_prefix() {
    let mut leaves = FlattenedMap::new();
    leaves.insert("menu.open".to_owned(), Tree::from("Open"));
    leaves.insert("menu".to_owned(), Tree::from("Menu"));
    assert_eq!(unflatten(&leaves, ArrayPolicy::Atomic), yaml("menu: Menu"));
}

#[rstest]
fn atomic_unflatten_keeps_numeric_keys_as_mappings() {
    let mut leaves = FlattenedMap::new();
    leaves.insert("steps.0".to_owned(), Tree::from("first"));
    leaves.insert("steps.1".to_owned(), Tree::from("second"));
    let tree = unflatten(&leaves, ArrayPolicy::Atomic);
    assert!(
        tree.as_mapping()
            .and_then(|root| root.get("steps"))
            .is_some_and(Tree::is_mapping)
    );
}

#[rstest]
fn indexed_unflatten_needs_contiguous_indices() {
    let mut leaves = FlattenedMap::new();
    leaves.insert("steps.0".to_owned(), Tree::from("first"));
    leaves.insert("steps.2".to_owned(), Tree::from("third"));
    let tree = unflatten(&leaves, ArrayPolicy::Indexed);
    assert!(
        tree.as_mapping()
            .and_then(|root| root.get("steps"))
            .is_some_and(Tree::is_mapping)
    );
}

#[rstest]
fn indexed_round_trip_turns_index_keyed_mappings_into_sequences() {
    let tree = yaml("counts:\n  \"0\": zero\n  \"1\": one\n");
    let restored = unflatten(&flatten(&tree, ArrayPolicy::Indexed), ArrayPolicy::Indexed);
    assert_eq!(restored, yaml("counts: [zero, one]"));
    assert_eq!(
        unflatten(&flatten(&tree, ArrayPolicy::Atomic), ArrayPolicy::Atomic),
        tree
    );
}

#[rstest]
fn null_leaves_are_preserved() {
    let leaves = flatten(&yaml("missing: ~"), ArrayPolicy::Atomic);
    assert_eq!(leaves.get("missing"), Some(&Tree::Scalar(Scalar::Null)));
}
