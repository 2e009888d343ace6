//! Summary views over a merged defaults report.
//!
//! Every view is a pure projection of one [`MergedReport`], applied per
//! attribute:
//!
//! | outcome                | details                     | concise                 | extra concise          |
//! |------------------------|-----------------------------|-------------------------|------------------------|
//! | `Identical(v)`         | `v`                         | `v`                     | `v`                    |
//! | `TypeDiff(n, v, tys)`  | `["@typeDiff:n", v, tys]`   | `"v = ['t1', 't2']"`    | `"v    @typeDiff"`     |
//! | `Different(n, vs)`     | `["@different:n", vs]`      | `"@different:n"`        | omitted                |
//!
//! [`MergedReport`]: tkd_types::MergedReport

pub mod view;

pub use view::{concise, concise_attribute, details, extra_concise, extra_concise_attribute, ReportView};
