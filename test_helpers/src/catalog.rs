//! Temporary directories pre-populated with catalog files.
//!
//! # Examples
//!
//! ```
//! use yamleo_test_helpers::catalog::CatalogDir;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = CatalogDir::new()?;
//! let path = dir.write("en.yaml", "title: Shop\n")?;
//! assert_eq!(dir.read("en.yaml")?, "title: Shop\n");
//! assert!(path.ends_with("en.yaml"));
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory that is removed when dropped.
#[derive(Debug)]
pub struct CatalogDir {
    root: Utf8PathBuf,
    _dir: TempDir,
}

impl CatalogDir {
    /// Creates an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is not
    /// valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary catalog directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        Ok(Self { root, _dir: dir })
    }

    /// Root of the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `relative` inside the directory.
    #[must_use]
    pub fn join(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Reads `relative` back as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.join(relative);
        std::fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }
}
