//! Load and serialise failures for catalog files.

use std::error::Error as StdError;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Boxed parser or emitter error.
pub type BoxedSource = Box<dyn StdError + Send + Sync>;

/// Errors raised while reading, parsing, serialising or writing a catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// The file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        /// Catalog location.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file contents are not valid for its format.
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        /// Catalog location.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        #[source]
        source: BoxedSource,
    },
    /// The document parsed, but its root is a scalar or a sequence.
    #[error("catalog {path} must contain a mapping at its root")]
    RootNotMapping {
        /// Catalog location.
        path: Utf8PathBuf,
    },
    /// The file extension does not name a supported format.
    #[error("unsupported catalog format for {path}; expected .yaml, .yml or .json")]
    UnsupportedFormat {
        /// Catalog location.
        path: Utf8PathBuf,
    },
    /// The tree cannot be represented in the target format.
    #[error("failed to serialise catalog {path}: {source}")]
    Serialise {
        /// Catalog location.
        path: Utf8PathBuf,
        /// Emitter diagnostic.
        #[source]
        source: BoxedSource,
    },
    /// The serialised text could not be written.
    #[error("failed to write catalog {path}: {source}")]
    Write {
        /// Catalog location.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

pub(super) fn read_error(path: &Utf8Path, source: std::io::Error) -> CatalogError {
    CatalogError::Read {
        path: path.to_path_buf(),
        source,
    }
}

pub(super) fn parse_error(path: &Utf8Path, source: impl Into<BoxedSource>) -> CatalogError {
    CatalogError::Parse {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

pub(super) fn serialise_error(path: &Utf8Path, source: impl Into<BoxedSource>) -> CatalogError {
    CatalogError::Serialise {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

pub(super) fn write_error(path: &Utf8Path, source: std::io::Error) -> CatalogError {
    CatalogError::Write {
        path: path.to_path_buf(),
        source,
    }
}
