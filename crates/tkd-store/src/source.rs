use std::path::{Path, PathBuf};

use tkd_types::Snapshot;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};
use crate::json::read_snapshot;

/// A snapshot together with the name it was loaded under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedSnapshot {
    pub name: String,
    pub snapshot: Snapshot,
}

impl NamedSnapshot {
    pub fn new(name: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            name: name.into(),
            snapshot,
        }
    }
}

/// Somewhere snapshots can be loaded from.
///
/// Loading is all-or-nothing: one malformed snapshot fails the whole load.
/// Snapshots are returned sorted by name.
pub trait SnapshotSource {
    fn load(&self) -> StoreResult<Vec<NamedSnapshot>>;

    /// Load and discard the names.
    fn load_snapshots(&self) -> StoreResult<Vec<Snapshot>> {
        Ok(self.load()?.into_iter().map(|n| n.snapshot).collect())
    }
}

/// Every regular, non-hidden file directly inside a directory.
///
/// Subdirectories (such as `error_dumps/`) are ignored.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotSource for DirectorySource {
    fn load(&self) -> StoreResult<Vec<NamedSnapshot>> {
        if !self.dir.is_dir() {
            return Err(StoreError::io(
                &self.dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let mut out = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !entry.file_type().is_file() || name.starts_with('.') {
                continue;
            }
            let snapshot = read_snapshot(entry.path())?;
            debug!(file = %name, classes = snapshot.len(), "loaded snapshot");
            out.push(NamedSnapshot::new(name, snapshot));
        }
        Ok(out)
    }
}

/// Pre-built snapshots held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    snapshots: Vec<NamedSnapshot>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, snapshot: Snapshot) {
        self.snapshots.push(NamedSnapshot::new(name, snapshot));
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotSource for InMemorySource {
    fn load(&self) -> StoreResult<Vec<NamedSnapshot>> {
        let mut out = self.snapshots.clone();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}
