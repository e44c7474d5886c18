//! The files in `clustering_tree/` directory define
//! the divisive clustering tree and the tree it produces.

/// Defines the builder of `DivisionClusteringTree`.
pub mod builder;
/// Defines the divisive clustering algorithm.
pub mod dctree;
/// Defines the fitted tree `ClusteringTree`.
pub mod clustering;
/// Defines the data-independent form of a tree.
pub mod encoding;

// Division rules and the search for the best one.
mod split_rule;
pub(crate) mod split_search;

mod depth;
mod node;
mod node_path;


pub use builder::DivisionClusteringTreeBuilder;
pub use dctree::DivisionClusteringTree;
pub use clustering::ClusteringTree;
pub use encoding::StructuralEncoding;
pub use node::{Node, NodeSummary};
pub use node_path::NodePath;
pub use split_rule::{DivisionRule, LeftRight};
pub use depth::Depth;
