//! The files in `homogeneity/` directory define
//! how the cohesion of a set of rows is scored.

/// Distance metrics between two rows.
pub mod metric;
/// Cluster-level distance methods.
pub mod distance_method;
/// Defines `HomogeneityMeasure` trait and its standard implementation.
pub mod measure;


pub use metric::Metric;
pub use distance_method::DistanceMethod;
pub use measure::{HomogeneityMeasure, Homogeneity};
