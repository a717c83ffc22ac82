//! Filesystem helpers shared across `yamleo` commands.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::{Result, io_error};

/// Opens an existing directory with ambient authority.
///
/// # Errors
///
/// Returns [`crate::error::YamleoError::Io`] when the directory cannot be
/// opened.
pub fn open_dir(path: &Utf8Path) -> Result<Dir> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|err| io_error(path, err))
}

/// Replaces the file at `path` with `contents`, creating it if needed.
///
/// # Errors
///
/// Returns [`crate::error::YamleoError::Io`] when the parent directory cannot
/// be opened or the file cannot be written.
pub fn write_text(path: &Utf8Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io_error(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let mut file = open_dir(parent)?
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|err| io_error(path, err))?;
    file.write_all(contents.as_bytes())
        .map_err(|err| io_error(path, err))
}
