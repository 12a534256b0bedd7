// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem primitives consumed by the sync engine

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// List every file under `root`, as paths relative to `root`.
/// Directories themselves are not reported.
pub fn list_files_recursively(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(root, Path::new(""), &mut files)?;
    Ok(files)
}

fn walk(root: &Path, rel: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(root.join(rel))? {
        let entry = entry?;
        let rel_path = rel.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            walk(root, &rel_path, files)?;
        } else {
            files.push(rel_path);
        }
    }
    Ok(())
}

/// Copy `src` over `dst` as a full overwrite, creating missing parent
/// directories. Returns bytes copied.
///
/// The destination is unlinked first so hardlinked archive snapshots keep
/// their pre-round content instead of being rewritten through the shared
/// inode.
pub fn copy_file(dst: &Path, src: &Path) -> io::Result<u64> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    match fs::remove_file(dst) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::copy(src, dst)
}

/// Hardlink `src` at `dst`, creating missing parent directories.
pub fn hard_link_file(dst: &Path, src: &Path) -> io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::hard_link(src, dst)
}

/// Create a directory; an already-present directory is a no-op.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    match fs::create_dir(path) {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        other => other,
    }
}

#[cfg(test)]
#[path = "fsops_tests.rs"]
mod tests;
