//! Importing snapshots downloaded from CI artifacts.
//!
//! Each artifact is a directory holding the captured snapshot
//! (`tkinter_defaults_curr.json`) and the file name it should be stored under
//! (`curr_out_filename.txt`). Existing files are never overwritten: if one
//! already holds different data, the incoming data is dumped to
//! `error_dumps/` for inspection instead.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};
use crate::json::{read_json, read_snapshot, to_json_string};

/// File inside an artifact naming the target snapshot file.
pub const ARTIFACT_NAME_FILE: &str = "curr_out_filename.txt";

/// File inside an artifact holding the captured snapshot.
pub const ARTIFACT_DATA_FILE: &str = "tkinter_defaults_curr.json";

/// Subdirectory of the destination receiving conflicting artifacts.
pub const DUMP_DIR: &str = "error_dumps";

/// Summary of an import run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Target names written for the first time.
    pub written: Vec<String>,
    /// Target names already holding identical data.
    pub unchanged: Vec<String>,
    /// Dump files written for conflicting artifacts.
    pub dumped: Vec<PathBuf>,
}

impl ImportReport {
    pub fn has_conflicts(&self) -> bool {
        !self.dumped.is_empty()
    }
}

/// Import every artifact directory in `artifacts_dir` into `dest_dir`.
pub fn import_artifacts(
    artifacts_dir: &Path,
    dest_dir: &Path,
    indent: usize,
) -> StoreResult<ImportReport> {
    fs::create_dir_all(dest_dir).map_err(|e| StoreError::io(dest_dir, e))?;

    let mut report = ImportReport::default();
    for entry in WalkDir::new(artifacts_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            warn!(path = %entry.path().display(), "skipping non-directory in artifacts");
            continue;
        }
        import_one(entry.path(), dest_dir, indent, &mut report)?;
    }

    info!(
        written = report.written.len(),
        unchanged = report.unchanged.len(),
        dumped = report.dumped.len(),
        "artifact import complete"
    );
    Ok(report)
}

fn import_one(
    artifact: &Path,
    dest_dir: &Path,
    indent: usize,
    report: &mut ImportReport,
) -> StoreResult<()> {
    let name_path = artifact.join(ARTIFACT_NAME_FILE);
    let name = fs::read_to_string(&name_path)
        .map_err(|e| StoreError::io(&name_path, e))?
        .trim()
        .to_string();
    if !is_plain_file_name(&name) {
        return Err(StoreError::InvalidArtifactName {
            artifact: artifact.to_path_buf(),
            name,
        });
    }

    let snapshot = read_snapshot(&artifact.join(ARTIFACT_DATA_FILE))?;
    let mut content = to_json_string(&snapshot, indent)?;
    content.push('\n');

    let target = dest_dir.join(&name);
    if !target.exists() {
        fs::write(&target, &content).map_err(|e| StoreError::io(&target, e))?;
        debug!(name = %name, "artifact written");
        report.written.push(name);
        return Ok(());
    }

    if read_json(&target)? == snapshot.to_value() {
        debug!(name = %name, "artifact already present");
        report.unchanged.push(name);
        return Ok(());
    }

    let dump = dump_artifact(dest_dir, &name, &content)?;
    warn!(
        name = %name,
        dump = %dump.display(),
        "artifact differs from existing file; dumped instead of overwriting"
    );
    report.dumped.push(dump);
    Ok(())
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

/// Write conflicting data to `error_dumps/dump__<stem>__<hash>.json`.
fn dump_artifact(dest_dir: &Path, name: &str, content: &str) -> StoreResult<PathBuf> {
    let dump_dir = dest_dir.join(DUMP_DIR);
    fs::create_dir_all(&dump_dir).map_err(|e| StoreError::io(&dump_dir, e))?;

    let digest = blake3::hash(content.as_bytes());
    let short = &hex::encode(digest.as_bytes())[..16];
    let stem = name.strip_suffix(".json").unwrap_or(name);
    let path = dump_dir.join(format!("dump__{stem}__{short}.json"));
    fs::write(&path, content).map_err(|e| StoreError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(root: &Path, dir: &str, name: &str, data: &str) {
        let a = root.join(dir);
        fs::create_dir_all(&a).unwrap();
        fs::write(a.join(ARTIFACT_NAME_FILE), format!("{name}\n")).unwrap();
        fs::write(a.join(ARTIFACT_DATA_FILE), data).unwrap();
    }

    #[test]
    fn new_artifacts_are_written() {
        let tmp = tempfile::tempdir().unwrap();
        let arts = tmp.path().join("downloaded");
        let dest = tmp.path().join("defaults");
        artifact(&arts, "a1", "default0__linux.json", r#"{"Button": {"bg": "white"}}"#);
        artifact(&arts, "a2", "default0__win.json", r#"{"Button": {"bg": "SystemButtonFace"}}"#);

        let report = import_artifacts(&arts, &dest, 4).unwrap();
        assert_eq!(report.written, vec!["default0__linux.json", "default0__win.json"]);
        assert!(report.unchanged.is_empty());
        assert!(!report.has_conflicts());
        assert!(dest.join("default0__win.json").is_file());
    }

    #[test]
    fn identical_artifact_is_unchanged() {
        let tmp = tempfile::tempdir().unwrap();
        let arts = tmp.path().join("downloaded");
        let dest = tmp.path().join("defaults");
        fs::create_dir_all(&dest).unwrap();
        // Same data, different formatting on disk.
        fs::write(dest.join("d.json"), r#"{ "A": { "x": 1 } }"#).unwrap();
        artifact(&arts, "a", "d.json", r#"{"A": {"x": 1}}"#);

        let report = import_artifacts(&arts, &dest, 4).unwrap();
        assert_eq!(report.unchanged, vec!["d.json"]);
        assert!(report.written.is_empty());
    }

    #[test]
    fn conflicting_artifact_is_dumped() {
        let tmp = tempfile::tempdir().unwrap();
        let arts = tmp.path().join("downloaded");
        let dest = tmp.path().join("defaults");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("d.json"), r#"{"A": {"x": 1}}"#).unwrap();
        artifact(&arts, "a", "d.json", r#"{"A": {"x": 2}}"#);

        let report = import_artifacts(&arts, &dest, 4).unwrap();
        assert!(report.has_conflicts());
        let dump = &report.dumped[0];
        assert!(dump.starts_with(dest.join(DUMP_DIR)));
        let file = dump.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file.starts_with("dump__d__"));
        assert_eq!(file.len(), "dump__d__".len() + 16 + ".json".len());
        // The original stays untouched.
        assert_eq!(fs::read_to_string(dest.join("d.json")).unwrap(), r#"{"A": {"x": 1}}"#);
    }

    #[test]
    fn path_like_names_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let arts = tmp.path().join("downloaded");
        artifact(&arts, "a", "../escape.json", r#"{}"#);
        let err = import_artifacts(&arts, &tmp.path().join("d"), 4).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArtifactName { .. }));
    }

    #[test]
    fn malformed_artifact_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let arts = tmp.path().join("downloaded");
        artifact(&arts, "a", "d.json", r#""just a string""#);
        let err = import_artifacts(&arts, &tmp.path().join("d"), 4).unwrap_err();
        assert!(matches!(err, StoreError::MalformedSnapshot { .. }));
    }
}
