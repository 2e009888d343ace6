use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::record::DEFAULT_MAX_ATTEMPTS;

/// Directory layout and output settings for a defaults workspace.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Where captured snapshots live.
    pub snapshots_dir: PathBuf,
    /// Where merged reports are written.
    pub output_dir: PathBuf,
    /// Where downloaded CI artifacts are unpacked.
    pub artifacts_dir: PathBuf,
    /// Bound on candidate names when recording a snapshot.
    pub max_path_attempts: usize,
    /// Indentation of written JSON; 0 for compact output.
    pub indent: usize,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            snapshots_dir: PathBuf::from("tkinter_defaults"),
            output_dir: PathBuf::from("merged_defaults"),
            artifacts_dir: PathBuf::from("downloaded_artifacts"),
            max_path_attempts: DEFAULT_MAX_ATTEMPTS,
            indent: 4,
        }
    }
}

impl WorkspaceConfig {
    /// Parse a TOML config document.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        Self::from_toml_str(&text).map_err(|source| StoreError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> StoreResult<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
