//! Artifact storage for toolkit default snapshots.
//!
//! This crate is the filesystem boundary around the merge engine. It loads
//! snapshot documents, rejects malformed ones before any merging happens,
//! writes reports as deterministic JSON, and files newly captured or
//! downloaded snapshots under non-colliding names.
//!
//! # Sources
//!
//! All snapshot sources implement the [`SnapshotSource`] trait:
//!
//! - [`DirectorySource`] -- every regular file in one directory
//! - [`InMemorySource`] -- pre-built snapshots for tests and embedding
//!
//! # Rules
//!
//! 1. A snapshot that is not valid JSON, or not an object of objects, aborts
//!    the load and names the offending file.
//! 2. Output documents have sorted keys and fixed indentation.
//! 3. Existing snapshot files are never overwritten.

pub mod config;
pub mod error;
pub mod import;
pub mod json;
pub mod record;
pub mod source;

pub use config::WorkspaceConfig;
pub use error::{StoreError, StoreResult};
pub use import::{import_artifacts, ImportReport};
pub use json::{read_json, read_snapshot, to_json_string, write_json};
pub use record::{
    default_platform_key, find_available_path, record_snapshot, snapshot_file_name, RecordOptions,
    RecordOutcome,
};
pub use source::{DirectorySource, InMemorySource, NamedSnapshot, SnapshotSource};
