//! Detection of catalog keys that no source file mentions.
//!
//! Usage is a plain substring test: a key counts as used when its full dotted
//! path appears anywhere in the concatenated source text. Keys built at
//! runtime are therefore reported as unused.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::Dir;
use rayon::prelude::*;
use tracing::debug;
use yamleo::FlattenedMap;

use crate::error::{Result, io_error};
use crate::fs_helpers::open_dir;

/// Source files found under a root directory.
#[derive(Debug)]
pub struct SourceTree {
    root: Utf8PathBuf,
    dir: Dir,
    files: Vec<Utf8PathBuf>,
}

impl SourceTree {
    /// Recursively lists files under `root` whose extension is one of
    /// `extensions`. A leading dot on an extension is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::YamleoError::Io`] when a directory cannot be
    /// opened or listed.
    pub fn scan(root: &Utf8Path, extensions: &[String]) -> Result<Self> {
        let wanted: Vec<&str> = extensions
            .iter()
            .map(|extension| extension.trim_start_matches('.'))
            .collect();
        let dir = open_dir(root)?;
        let mut files = Vec::new();
        collect_files(&dir, root, Utf8Path::new(""), &wanted, &mut files)?;
        debug!(root = %root, files = files.len(), "scanned source tree");
        Ok(Self {
            root: root.to_path_buf(),
            dir,
            files,
        })
    }

    /// Paths of the matching files, relative to the root, in sorted order.
    #[must_use]
    pub fn files(&self) -> &[Utf8PathBuf] {
        &self.files
    }

    /// Returns `true` when no file matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Reads every file in parallel and joins the contents with newlines.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::YamleoError::Io`] for the first file that
    /// cannot be read as UTF-8 text.
    pub fn read_corpus(&self) -> Result<String> {
        let contents = self
            .files
            .par_iter()
            .map(|file| {
                self.dir
                    .read_to_string(file)
                    .map_err(|err| io_error(self.root.join(file), err))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(contents.join("\n"))
    }
}

fn collect_files(
    dir: &Dir,
    root: &Utf8Path,
    relative: &Utf8Path,
    extensions: &[&str],
    files: &mut Vec<Utf8PathBuf>,
) -> Result<()> {
    let location = root.join(relative);
    let mut entries = Vec::new();
    for entry_result in dir.entries().map_err(|err| io_error(&location, err))? {
        let entry = entry_result.map_err(|err| io_error(&location, err))?;
        let name = entry.file_name().map_err(|err| io_error(&location, err))?;
        let file_type = entry.file_type().map_err(|err| io_error(&location, err))?;
        entries.push((Utf8PathBuf::from(name), file_type));
    }
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    for (name, file_type) in entries {
        let path = relative.join(&name);
        if file_type.is_dir() {
            let subdir = dir
                .open_dir(&name)
                .map_err(|err| io_error(root.join(&path), err))?;
            collect_files(&subdir, root, &path, extensions, files)?;
        } else if file_type.is_file()
            && name
                .extension()
                .is_some_and(|extension| extensions.contains(&extension))
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Returns the paths of `leaves`, in order, that `corpus` does not contain.
///
/// # Examples
///
/// ```rust
/// use yamleo::{FlattenedMap, Tree};
/// use yamleo_cli::audit::unused_keys;
///
/// let mut leaves = FlattenedMap::new();
/// leaves.insert("menu.open".to_owned(), Tree::from("Open"));
/// leaves.insert("menu.close".to_owned(), Tree::from("Close"));
///
/// let corpus = "<button>{{ t('menu.open') }}</button>";
/// assert_eq!(unused_keys(&leaves, corpus), ["menu.close"]);
/// ```
#[must_use]
pub fn unused_keys(leaves: &FlattenedMap, corpus: &str) -> Vec<String> {
    leaves
        .keys()
        .filter(|path| !corpus.contains(path.as_str()))
        .cloned()
        .collect()
}

/// Removes `unused` paths from `leaves`, keeping the order of the rest.
pub fn prune(leaves: &mut FlattenedMap, unused: &[String]) {
    for path in unused {
        leaves.shift_remove(path);
    }
}
