//! Foundation types for toolkit default snapshots.
//!
//! A snapshot is one capture run's `class -> attribute -> value` mapping for a
//! single platform or toolkit build. This crate defines the snapshot model,
//! the opaque-handle markers the capture step leaves behind for native objects,
//! the canonical form used for loose value comparison, and the three-way merge
//! outcome together with its `details.json` wire encoding.
//!
//! # Key Types
//!
//! - [`Snapshot`] / [`AttributeMap`] -- one platform's captured defaults
//! - [`OpaqueHandle`] -- a native object recorded as `type` + textual form
//! - [`CanonicalForm`] -- `(type tag, string form)` pair for loose equality
//! - [`MergedAttribute`] -- `Identical` / `TypeDiff` / `Different` outcome
//! - [`MergedReport`] -- class -> attribute -> outcome, across all snapshots

pub mod canonical;
pub mod error;
pub mod handle;
pub mod outcome;
pub mod render;
pub mod report;
pub mod snapshot;

pub use canonical::CanonicalForm;
pub use error::{TypeError, TypeResult};
pub use handle::OpaqueHandle;
pub use outcome::{MergeKind, MergedAttribute};
pub use report::{MergedClass, MergedReport, ReportStats};
pub use snapshot::{json_type_name, AttributeMap, Snapshot};
