//! Shared fixtures for the behavioral specs.

use std::fs;
use std::path::Path;
use sv_sync::DepotDescriptor;
use tempfile::TempDir;

/// A depot rooted in a temporary directory: `source/` and `depot/` both
/// exist and are empty.
pub struct DepotFixture {
    /// Held so the temp tree outlives the test body.
    pub _dir: TempDir,
    pub desc: DepotDescriptor,
}

pub fn depot(name: &str, interval_minutes: u64) -> DepotFixture {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source");
    let destination = dir.path().join("depot");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(&destination).unwrap();
    let desc = DepotDescriptor::new(name, &source, &destination, "ops", interval_minutes, 7);
    DepotFixture { _dir: dir, desc }
}

/// Write `content` at `root/rel`, creating parent directories.
pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

/// Archive snapshot directories, oldest first.
pub fn snapshots(desc: &DepotDescriptor) -> Vec<std::path::PathBuf> {
    let mut labels: Vec<_> = fs::read_dir(desc.archive_root())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    labels.sort();
    labels
}
