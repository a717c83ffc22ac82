//! Duplicate key and duplicate value detection.
//!
//! Two independent detectors feed one report:
//!
//! - [`duplicate_raw_keys`] scans serialised text line by line and tracks
//!   every key name in a single set, regardless of nesting. The same leaf
//!   name under two unrelated branches is therefore reported too; the scan
//!   is a text heuristic, not a structural check.
//! - [`duplicate_values`] groups leaves whose values collapse to the same
//!   text under [`normalise_value`].

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::flatten::{ArrayPolicy, flatten};
use crate::tree::Tree;

/// Characters removed from values before comparison.
const STRIPPED_PUNCTUATION: &[char] = &['.', ',', '!', '?', '"', '\'', '(', ')', ':', ';', '-'];

/// Leading Arabic definite article.
const ARABIC_ARTICLE: &str = "ال";

/// Separator between member paths of one duplicate-value group.
pub const GROUP_SEPARATOR: &str = ", ";

/// Returns key names that appear on more than one key line of `raw`.
///
/// A key line is optional leading whitespace, a run of ASCII word
/// characters, dots or hyphens, then a colon. Each repeated key is reported
/// once, in the order its first repeat was seen.
///
/// # Examples
///
/// ```rust
/// use yamleo::duplicate_raw_keys;
///
/// let raw = "home:\n  title: Home\nabout:\n  title: About\n  title: Again\n";
/// assert_eq!(duplicate_raw_keys(raw), ["title"]);
/// ```
#[must_use]
pub fn duplicate_raw_keys(raw: &str) -> Vec<String> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut seen = HashSet::new();
    let mut repeated = IndexSet::new();
    for key in raw.split('\n').filter_map(key_of_line) {
        if !seen.insert(key) {
            repeated.insert(key.to_owned());
        }
    }
    repeated.into_iter().collect()
}

fn key_of_line(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let end = trimmed
        .find(|ch: char| !is_key_char(ch))
        .unwrap_or(trimmed.len());
    let (key, rest) = trimmed.split_at(end);
    (!key.is_empty() && rest.starts_with(':')).then_some(key)
}

const fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-')
}

/// Groups leaf paths whose normalised values are identical.
///
/// Every group with at least two members yields one entry listing the member
/// paths joined by [`GROUP_SEPARATOR`]. Groups appear in the order their
/// first member was flattened.
///
/// # Examples
///
/// ```rust
/// use yamleo::{ArrayPolicy, Tree, duplicate_values};
///
/// let tree: Tree = serde_json::from_str(r#"{"a": "Hello.", "b": "hello", "c": "world"}"#)?;
/// assert_eq!(duplicate_values(&tree, ArrayPolicy::Atomic), ["a, b"]);
/// # Ok::<_, serde_json::Error>(())
/// ```
#[must_use]
pub fn duplicate_values(tree: &Tree, policy: ArrayPolicy) -> Vec<String> {
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
    for (path, leaf) in flatten(tree, policy) {
        groups
            .entry(normalise_value(&leaf.to_text()))
            .or_default()
            .push(path);
    }
    groups
        .into_values()
        .filter(|members| members.len() > 1)
        .map(|members| members.join(GROUP_SEPARATOR))
        .collect()
}

/// Reduces a value to the text used for duplicate comparison.
///
/// The steps run in this order: trim, lowercase, drop punctuation, drop a
/// leading `the` followed by whitespace, drop a leading `ال` and any
/// whitespace after it, drop one trailing `s`, and collapse whitespace runs
/// to a single space.
///
/// # Examples
///
/// ```rust
/// use yamleo::normalise_value;
///
/// assert_eq!(normalise_value("  The Settings! "), "setting");
/// assert_eq!(normalise_value("الكتاب"), "كتاب");
/// ```
#[must_use]
pub fn normalise_value(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let unpunctuated: String = lowered
        .chars()
        .filter(|ch| !STRIPPED_PUNCTUATION.contains(ch))
        .collect();
    let without_english = strip_english_article(&unpunctuated);
    let without_arabic = without_english
        .strip_prefix(ARABIC_ARTICLE)
        .map_or(without_english, str::trim_start);
    let singular = without_arabic.strip_suffix('s').unwrap_or(without_arabic);
    collapse_whitespace(singular)
}

fn strip_english_article(value: &str) -> &str {
    value
        .strip_prefix("the")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map_or(value, str::trim_start)
}

fn collapse_whitespace(value: &str) -> String {
    let mut collapsed = String::with_capacity(value.len());
    let mut previous_was_space = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            if !previous_was_space {
                collapsed.push(' ');
            }
            previous_was_space = true;
        } else {
            collapsed.push(ch);
            previous_was_space = false;
        }
    }
    collapsed
}

/// Returns raw duplicate keys (when `raw` is given) followed by duplicate
/// value groups, without repeats.
#[must_use]
pub fn duplicates(tree: &Tree, raw: Option<&str>, policy: ArrayPolicy) -> Vec<String> {
    let raw_duplicates = raw.map(duplicate_raw_keys).unwrap_or_default();
    let combined: IndexSet<String> = raw_duplicates
        .into_iter()
        .chain(duplicate_values(tree, policy))
        .collect();
    combined.into_iter().collect()
}
