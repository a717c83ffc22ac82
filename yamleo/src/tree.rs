//! The recursive value every engine operates on.
//!
//! A catalog parses into a [`Tree`]: a scalar leaf, an ordered sequence, or an
//! insertion-ordered mapping from string keys to subtrees. Engines match on
//! these three variants exhaustively instead of inspecting runtime types.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{
    self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use serde::ser::{Serialize, Serializer};

/// Insertion-ordered mapping level of a [`Tree`].
pub type Mapping = IndexMap<String, Tree>;

/// Leaf value stored in a catalog.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Explicit null (`~`, `null`, or an empty YAML value).
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Unsigned integer too large for [`Scalar::Integer`].
    Unsigned(u64),
    /// Floating point number.
    Float(f64),
    /// Text, the common case for translations.
    String(String),
}

/// A nested catalog value.
///
/// # Examples
///
/// ```rust
/// use yamleo::{Mapping, Tree};
///
/// let mut greetings = Mapping::new();
/// greetings.insert("hello".to_owned(), Tree::from("Hello"));
/// let tree = Tree::Mapping(greetings);
/// assert!(tree.is_mapping());
/// assert_eq!(tree.to_text(), r#"{"hello":"Hello"}"#);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Tree {
    /// A leaf value.
    Scalar(Scalar),
    /// An ordered list of subtrees.
    Sequence(Vec<Tree>),
    /// A keyed level of the catalog.
    Mapping(Mapping),
}

impl Tree {
    /// Returns an empty mapping, the shape of an empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// Returns `true` when this node is a mapping level.
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Borrows the mapping level, if this node is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    /// Borrows the string payload of a string leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(text)) => Some(text),
            Self::Scalar(_) | Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }

    /// Renders the node as plain text.
    ///
    /// Strings are returned verbatim, `null` as the literal `"null"`, numbers
    /// and booleans in their usual notation (integral floats without a
    /// fractional part), and containers as compact JSON.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Scalar(scalar) => scalar.to_string(),
            Self::Sequence(_) | Self::Mapping(_) => {
                serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Integer(number) => write!(f, "{number}"),
            Self::Unsigned(number) => write!(f, "{number}"),
            Self::Float(number) if number.is_infinite() => {
                f.write_str(if number.is_sign_positive() {
                    "Infinity"
                } else {
                    "-Infinity"
                })
            }
            Self::Float(number) => write!(f, "{number}"),
            Self::String(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Tree {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::String(value.to_owned()))
    }
}

impl From<String> for Tree {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::String(value))
    }
}

impl From<bool> for Tree {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Tree {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

impl From<f64> for Tree {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<Scalar> for Tree {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(value: Vec<Tree>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Mapping> for Tree {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Integer(number) => serializer.serialize_i64(*number),
            Self::Unsigned(number) => serializer.serialize_u64(*number),
            Self::Float(number) => serializer.serialize_f64(*number),
            Self::String(text) => serializer.serialize_str(text),
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(map) => serializer.collect_map(map),
        }
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TreeVisitor)
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = Tree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, a sequence or a mapping")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Tree, E> {
        Ok(Tree::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Tree, E> {
        Ok(Tree::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Tree, E> {
        Ok(Tree::Scalar(
            i64::try_from(value).map_or(Scalar::Unsigned(value), Scalar::Integer),
        ))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Tree, E> {
        Ok(Tree::from(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Tree, E> {
        Ok(Tree::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Tree, E> {
        Ok(Tree::from(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Tree, E> {
        Ok(Tree::Scalar(Scalar::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Tree, E> {
        Ok(Tree::Scalar(Scalar::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Tree, D::Error> {
        Tree::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Tree, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Tree::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Tree, A::Error> {
        let mut map = Mapping::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(MappingKey(key)) = access.next_key()? {
            let value = access.next_value()?;
            if map.insert(key.clone(), value).is_some() {
                tracing::warn!(key = %key, "duplicate mapping key; the later value wins");
            }
        }
        Ok(Tree::Mapping(map))
    }

    /// YAML values carrying a custom tag (`!name value`) keep their value.
    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Tree, A::Error> {
        let (tag, value) = data.variant::<String>()?;
        tracing::warn!(tag = %tag, "ignoring custom YAML tag");
        value.newtype_variant()
    }
}

/// Mapping key that tolerates non-string YAML keys such as `1:` or `true:`.
struct MappingKey(String);

impl<'de> Deserialize<'de> for MappingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MappingKeyVisitor)
    }
}

struct MappingKeyVisitor;

impl Visitor<'_> for MappingKeyVisitor {
    type Value = MappingKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<MappingKey, E> {
        Ok(MappingKey(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<MappingKey, E> {
        Ok(MappingKey(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<MappingKey, E> {
        Ok(MappingKey(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<MappingKey, E> {
        Ok(MappingKey(Scalar::Float(value).to_string()))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<MappingKey, E> {
        Ok(MappingKey(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<MappingKey, E> {
        Ok(MappingKey(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<MappingKey, E> {
        Ok(MappingKey("null".to_owned()))
    }
}
