//! Catalog files: loading, parsing, serialising and writing.
//!
//! The format is chosen from the file extension: `.yaml`/`.yml` through
//! `serde_yaml`, `.json` through `serde_json`. A blank document loads as an
//! empty mapping; any other non-mapping root is rejected.

mod error;
mod format;
mod loader;

pub use error::{BoxedSource, CatalogError, CatalogResult};
pub use format::CatalogFormat;
pub use loader::{Catalog, load_catalog, parse_catalog, serialise, write_catalog};

#[cfg(test)]
mod tests;
