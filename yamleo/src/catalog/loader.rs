//! Reading catalogs from disk and writing them back.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::debug;

use super::error::{
    CatalogError, CatalogResult, parse_error, read_error, serialise_error, write_error,
};
use super::format::CatalogFormat;
use crate::tree::{Scalar, Tree};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// A parsed catalog together with the text it was parsed from.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    /// Where the catalog was read from.
    pub path: Utf8PathBuf,
    /// Format implied by the file extension.
    pub format: CatalogFormat,
    /// The file contents without a leading byte-order mark, used by the raw
    /// duplicate scan.
    pub raw: String,
    /// The parsed document; always a mapping.
    pub tree: Tree,
}

/// Reads and parses the catalog at `path`.
///
/// # Errors
///
/// Returns a [`CatalogError`] when the extension is unsupported, the file
/// cannot be read, or its contents do not parse into a mapping.
pub fn load_catalog(path: &Utf8Path) -> CatalogResult<Catalog> {
    let format = CatalogFormat::from_path(path)?;
    let raw = std::fs::read_to_string(path).map_err(|err| read_error(path, err))?;
    let catalog = parse_with_format(path, format, raw)?;
    debug!(path = %path, "loaded catalog");
    Ok(catalog)
}

/// Parses in-memory catalog text as if it had been read from `path`.
///
/// # Errors
///
/// Returns a [`CatalogError`] when the extension is unsupported or the text
/// does not parse into a mapping.
///
/// # Examples
///
/// ```rust
/// use camino::Utf8Path;
/// use yamleo::catalog::parse_catalog;
///
/// let catalog = parse_catalog(Utf8Path::new("en.yaml"), "title: Shop\n".to_owned())?;
/// assert!(catalog.tree.is_mapping());
/// # Ok::<_, yamleo::CatalogError>(())
/// ```
pub fn parse_catalog(path: &Utf8Path, raw: String) -> CatalogResult<Catalog> {
    let format = CatalogFormat::from_path(path)?;
    parse_with_format(path, format, raw)
}

fn parse_with_format(path: &Utf8Path, format: CatalogFormat, raw: String) -> CatalogResult<Catalog> {
    let raw = match raw.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => rest.to_owned(),
        None => raw,
    };
    let tree = match format.parse(&raw).map_err(|err| parse_error(path, err))? {
        Tree::Scalar(Scalar::Null) => Tree::empty(),
        tree @ Tree::Mapping(_) => tree,
        Tree::Scalar(_) | Tree::Sequence(_) => {
            return Err(CatalogError::RootNotMapping {
                path: path.to_path_buf(),
            });
        }
    };
    Ok(Catalog {
        path: path.to_path_buf(),
        format,
        raw,
        tree,
    })
}

/// Serialises `tree` in the format implied by `path` without writing it.
///
/// # Errors
///
/// Returns a [`CatalogError`] when the extension is unsupported or the tree
/// cannot be represented in that format.
pub fn serialise(path: &Utf8Path, tree: &Tree) -> CatalogResult<String> {
    let format = CatalogFormat::from_path(path)?;
    format.render(tree).map_err(|err| serialise_error(path, err))
}

/// Serialises `tree` and replaces the file at `path` with the result.
///
/// # Errors
///
/// Returns a [`CatalogError`] when serialising fails or the file cannot be
/// written.
pub fn write_catalog(path: &Utf8Path, tree: &Tree) -> CatalogResult<()> {
    let text = serialise(path, tree)?;
    replace_file(path, &text).map_err(|err| write_error(path, err))?;
    debug!(path = %path, bytes = text.len(), "wrote catalog");
    Ok(())
}

/// Writes `text` through a handle on the parent directory of `path`.
fn replace_file(path: &Utf8Path, text: &str) -> io::Result<()> {
    let Some(name) = path.file_name() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "catalog path has no file name",
        ));
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    Dir::open_ambient_dir(parent, ambient_authority())?.write(name, text)
}
