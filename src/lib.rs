#![warn(missing_docs)]

//!
//! A crate that builds divisive hierarchical clustering trees
//! over tabular numerical data.
//!
//! Starting from the whole dataset,
//! a [`DivisionClusteringTree`] repeatedly divides a set of rows
//! by a rule `feature > threshold` with an integer threshold.
//! The rule is the one minimizing the size-weighted homogeneity
//! of the two parts,
//! where the homogeneity of a set of rows is computed over
//! a separate group of *motivation* columns.
//!
//! The resulting [`ClusteringTree`] is queried by node id
//! (the root is `0` and the children of `p` are `2p + 1` and `2p + 2`),
//! and can be saved as a [`StructuralEncoding`]
//! that keeps the rules but not the rows.
//! Given the same sample, the encoding rebuilds the same tree.
//!
//! ```no_run
//! use divclust::prelude::*;
//!
//! let sample = SampleReader::default()
//!     .file("/path/to/data/file.csv")
//!     .has_header(true)
//!     .read()
//!     .unwrap();
//!
//! let tree = DivisionClusteringTreeBuilder::new()
//!     .division_rules(&["age", "income"])
//!     .motivation_columns(&["score"])
//!     .min_size(10)
//!     .build()
//!     .unwrap();
//!
//! let clusters = tree.fit(&sample).unwrap();
//! clusters.print_summary();
//! clusters.to_json_file("tree.json").unwrap();
//!
//! let restored = ClusteringTree::from_json_file(&sample, "tree.json")
//!     .unwrap();
//! assert_eq!(clusters, restored);
//! ```

pub mod constants;
pub mod error;
pub mod sample;
pub mod homogeneity;
pub mod clustering_tree;
pub mod prelude;


pub use sample::{Sample, Feature, SampleReader};

pub use homogeneity::{
    HomogeneityMeasure,
    Homogeneity,
    DistanceMethod,
    Metric,
};

pub use clustering_tree::{
    DivisionClusteringTreeBuilder,
    DivisionClusteringTree,
    ClusteringTree,
    StructuralEncoding,
    Node,
    NodeSummary,
    NodePath,
    DivisionRule,
    LeftRight,
    Depth,
};

pub use error::{ClusteringError, Result};
