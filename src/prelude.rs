//! Exports the clustering tree, its inputs, and its measures.
//!
pub use crate::sample::{
    Sample,
    Feature,
    SampleReader,
};


pub use crate::homogeneity::{
    // Measure trait
    HomogeneityMeasure,

    // Standard measure
    Homogeneity,
    DistanceMethod,
    Metric,
};


pub use crate::clustering_tree::{
    // Algorithm
    DivisionClusteringTreeBuilder,
    DivisionClusteringTree,

    // Fitted tree
    ClusteringTree,
    StructuralEncoding,
    Node,
    NodeSummary,
    NodePath,
    DivisionRule,
    LeftRight,
    Depth,
};


pub use crate::error::ClusteringError;
