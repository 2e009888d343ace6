use std::path::PathBuf;

use tkd_types::TypeError;

/// Errors from artifact storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error on a specific file or directory.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// The file is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The file is valid JSON but not a snapshot document.
    #[error("malformed snapshot {}: {source}", path.display())]
    MalformedSnapshot { path: PathBuf, source: TypeError },

    /// Every candidate file name was taken by a different snapshot.
    #[error("checked {attempts} paths in {}, none available", dir.display())]
    NoAvailablePath { dir: PathBuf, attempts: usize },

    /// An artifact names a target that is not a plain file name.
    #[error("artifact {} names invalid target {name:?}", artifact.display())]
    InvalidArtifactName { artifact: PathBuf, name: String },

    /// The configuration file could not be parsed.
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Serialization failure while rendering output.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
