//! Reconciliation engine for toolkit default snapshots.
//!
//! Given N independently captured snapshots, produces one [`MergedReport`]
//! in which every `(class, attribute)` pair seen anywhere is classified as
//! identical everywhere, identical up to representation type, or different.
//! The result is a pure function of the input multiset: reordering the
//! snapshots never changes it.
//!
//! # Pipeline
//!
//! - [`canonicalize`] -- value -> `(type tag, string form)`
//! - [`Hashable`] -- hashable projection of any JSON value, for deduplication
//! - [`dedup`] -- distinct values, hashing scalars directly when possible
//! - [`merge_attribute`] -- classify one attribute's observed values
//! - [`merge_widget`] / [`merge_data`] -- union of attributes / classes
//!
//! [`MergedReport`]: tkd_types::MergedReport

pub mod attribute;
pub mod canonicalize;
pub mod dedup;
pub mod hashable;
pub mod merger;
pub mod ordering;

pub use attribute::merge_attribute;
pub use canonicalize::{canonicalize, float_text};
pub use dedup::dedup;
pub use hashable::{FrozenMap, Hashable};
pub use merger::{merge_data, merge_widget};
pub use ordering::{compare_values, sort_values};
