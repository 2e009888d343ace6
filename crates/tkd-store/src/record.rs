//! Filing a captured snapshot under a non-colliding name.
//!
//! Snapshots are stored as `default{n}__{platform}.json`. Several captures of
//! the same platform get increasing `n`; a capture identical to one already on
//! disk is not written again. The search is bounded so a runaway directory
//! cannot keep it spinning.

use std::fs;
use std::path::{Path, PathBuf};

use tkd_types::Snapshot;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::json::to_json_string;

/// Default bound on candidate file names tried.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000;

/// File name of the `n`-th snapshot for `platform`.
pub fn snapshot_file_name(n: usize, platform: &str) -> String {
    format!("default{n}__{platform}.json")
}

/// Platform key of the running host, e.g. `linux-x86_64`.
pub fn default_platform_key() -> String {
    format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

/// Replace characters that do not belong in a file name.
fn sanitize_platform(platform: &str) -> String {
    platform
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Find where `content` should be written in `dir`.
///
/// Returns the first candidate that does not exist yet, or `None` if some
/// candidate already holds exactly `content`. Fails after `max_attempts`
/// candidates are all taken by other content.
pub fn find_available_path(
    dir: &Path,
    platform: &str,
    content: &[u8],
    max_attempts: usize,
) -> StoreResult<Option<PathBuf>> {
    let platform = sanitize_platform(platform);
    for n in 0..max_attempts {
        let path = dir.join(snapshot_file_name(n, &platform));
        if !path.exists() {
            return Ok(Some(path));
        }
        let existing = fs::read(&path).map_err(|e| StoreError::io(&path, e))?;
        if existing == content {
            return Ok(None);
        }
        debug!(path = %path.display(), "snapshot name taken by different content");
    }
    Err(StoreError::NoAvailablePath {
        dir: dir.to_path_buf(),
        attempts: max_attempts,
    })
}

/// Options for [`record_snapshot`].
#[derive(Clone, Debug)]
pub struct RecordOptions {
    /// Indentation of the written document.
    pub indent: usize,
    /// Bound on candidate names tried.
    pub max_attempts: usize,
    /// When `false`, always write to the first candidate name.
    pub check_overwrite: bool,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            check_overwrite: true,
        }
    }
}

/// What [`record_snapshot`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The snapshot was written to this path.
    Written(PathBuf),
    /// An identical snapshot was already stored.
    Unchanged,
}

/// Store `snapshot` for `platform` in `dir`, creating `dir` if needed.
pub fn record_snapshot(
    dir: &Path,
    platform: &str,
    snapshot: &Snapshot,
    options: &RecordOptions,
) -> StoreResult<RecordOutcome> {
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut content = to_json_string(snapshot, options.indent)?;
    content.push('\n');

    let path = if options.check_overwrite {
        match find_available_path(dir, platform, content.as_bytes(), options.max_attempts)? {
            Some(path) => path,
            None => {
                info!(platform, "identical snapshot already stored");
                return Ok(RecordOutcome::Unchanged);
            }
        }
    } else {
        dir.join(snapshot_file_name(0, &sanitize_platform(platform)))
    };

    fs::write(&path, content).map_err(|e| StoreError::io(&path, e))?;
    info!(path = %path.display(), "snapshot recorded");
    Ok(RecordOutcome::Written(path))
}
