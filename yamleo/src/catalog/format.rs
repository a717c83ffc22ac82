//! Format selection by file extension.

use camino::Utf8Path;

use super::error::{BoxedSource, CatalogError, CatalogResult};
use crate::tree::{Scalar, Tree};

/// Serialised catalog formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `.yaml` or `.yml`.
    Yaml,
    /// `.json`.
    Json,
}

impl CatalogFormat {
    /// Chooses the format from the extension of `path`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Utf8Path) -> CatalogResult<Self> {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(CatalogError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parses `raw` into a tree. Blank documents parse as an empty mapping.
    pub(super) fn parse(self, raw: &str) -> Result<Tree, BoxedSource> {
        if raw.trim().is_empty() {
            return Ok(Tree::empty());
        }
        let tree = match self {
            Self::Yaml => serde_yaml::from_str(raw)?,
            Self::Json => serde_json::from_str(raw)?,
        };
        Ok(tree)
    }

    /// Renders `tree` as text, ending with a newline.
    pub(super) fn render(self, tree: &Tree) -> Result<String, BoxedSource> {
        match self {
            Self::Yaml => Ok(serde_yaml::to_string(tree)?),
            Self::Json => {
                if has_non_finite_float(tree) {
                    return Err("JSON cannot represent NaN or infinite numbers".into());
                }
                let mut text = serde_json::to_string_pretty(tree)?;
                text.push('\n');
                Ok(text)
            }
        }
    }
}

fn has_non_finite_float(tree: &Tree) -> bool {
    match tree {
        Tree::Scalar(Scalar::Float(number)) => !number.is_finite(),
        Tree::Scalar(_) => false,
        Tree::Sequence(items) => items.iter().any(has_non_finite_float),
        Tree::Mapping(entries) => entries.values().any(has_non_finite_float),
    }
}
