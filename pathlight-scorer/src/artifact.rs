//! Capability-based filesystem helpers for artefact IO.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Ensure the parent directory for `path` exists.
///
/// Absolute paths are resolved against the filesystem root; relative paths
/// against the current directory. A path without a parent is a no-op.
pub(crate) fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base, relative) = parent
        .strip_prefix("/")
        .map_or((Utf8Path::new("."), parent), |stripped| {
            (Utf8Path::new("/"), stripped)
        });
    if relative.as_str().is_empty() {
        return Ok(());
    }
    let dir = fs_utf8::Dir::open_ambient_dir(base, ambient_authority())?;
    dir.create_dir_all(relative)
}
