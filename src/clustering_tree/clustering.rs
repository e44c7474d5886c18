//! Defines the fitted clustering tree.
use colored::Colorize;
use tracing::info;

use std::path::Path;
use std::fs::File;
use std::io::prelude::*;

use crate::Sample;
use crate::constants::{PRINT_WIDTH, PRINT_PREC_WIDTH, FULL_WIDTH};
use crate::error::{ClusteringError, Result};
use super::{
    depth::Depth,
    encoding::StructuralEncoding,
    node::{Node, NodeSummary},
    node_path::NodePath,
    split_rule::LeftRight,
};


/// A clustering tree built on a sample.
///
/// The tree borrows the sample it was built on:
/// leaves store row indices into it.
/// Every node is numbered as in [`NodePath`],
/// so that nodes are queried by id.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringTree<'a> {
    sample: &'a Sample,
    root:   Node,
}


impl<'a> ClusteringTree<'a> {
    #[inline]
    pub(crate) fn new(sample: &'a Sample, root: Node) -> Self {
        Self { sample, root }
    }


    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Returns the sample this tree was built on.
    pub fn sample(&self) -> &'a Sample {
        self.sample
    }


    /// Returns the mean of the homogeneity values over the leaves.
    pub fn mean_homogeneity_in_leaves(&self) -> f64 {
        let (sum, count) = self.root.sum_homogeneity_in_leaves();
        sum / count as f64
    }


    /// Returns the number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }


    /// Walks from the root along the path of `id`
    /// and calls `visit` at every branch it leaves, with the step taken.
    fn walk<F>(&self, id: usize, mut visit: F) -> Result<&Node>
        where F: FnMut(&Node, LeftRight),
    {
        let mut node = &self.root;
        for &step in NodePath::from_id(id).iter() {
            visit(node, step);
            node = node.child(step)
                .ok_or(ClusteringError::InvalidNodeId(id))?;
        }

        if node.id() != Some(id) {
            return Err(ClusteringError::NodeIdMismatch {
                expected: id,
                actual: node.id(),
            });
        }
        Ok(node)
    }


    /// Returns the node numbered `id`.
    ///
    /// Returns [`ClusteringError::InvalidNodeId`]
    /// if the path of `id` runs into a leaf.
    pub fn node_by_id(&self, id: usize) -> Result<&Node> {
        self.walk(id, |_, _| {})
    }


    /// Returns the rows in the subtree of the node `id`,
    /// leaves from left to right.
    pub fn indices_in_subtree_by_id(&self, id: usize) -> Result<Vec<usize>> {
        let node = self.node_by_id(id)?;
        Ok(node.rows_in_subtree())
    }


    /// Returns the rows in the subtree of the node `id` as a new sample.
    pub fn data_in_subtree_by_id(&self, id: usize) -> Result<Sample> {
        let rows = self.indices_in_subtree_by_id(id)?;
        Ok(self.sample.subset(&rows))
    }


    /// Returns the rules that lead from the root to the node `id`,
    /// formatted as `"<rule> = <side>"`
    /// where the side is `true` if the path goes right.
    pub fn division_rules_by_id(&self, id: usize) -> Result<Vec<String>> {
        let mut rules = Vec::new();
        self.walk(id, |node, step| {
            if let Some(rule) = node.rule() {
                let right = step == LeftRight::Right;
                rules.push(format!("{rule} = {right}"));
            }
        })?;
        Ok(rules)
    }


    /// Writes the rows in the subtree of the node `id`
    /// to the CSV file `path`.
    pub fn export_subtree_by_id_to_csv<P>(&self, id: usize, path: P)
        -> Result<()>
        where P: AsRef<Path>,
    {
        let data = self.data_in_subtree_by_id(id)?;
        data.to_csv(path)
    }


    /// Returns the summary of every node in pre-order.
    pub fn node_summaries(&self) -> Vec<NodeSummary> {
        let mut summaries = Vec::new();
        self.root.summaries(Depth::ROOT, &mut summaries);
        summaries
    }


    /// Prints the node summaries as a table.
    pub fn print_summary(&self) {
        println!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "CLUSTERING TREE".bold(), "",
        );
        println!(
            "{:>PRINT_WIDTH$}\t{:>PRINT_WIDTH$}\t{:>PRINT_WIDTH$}\t{:>PRINT_WIDTH$}\t{}",
            "ID".bold().red(),
            "DEPTH".bold().blue(),
            "SIZE".bold().green(),
            "HOMOG.".bold().yellow(),
            "RULE".bold().cyan(),
        );

        for summary in self.node_summaries() {
            let id = summary.id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            let rule = if summary.rule.is_empty() {
                "(leaf)".to_string()
            } else {
                summary.rule
            };
            println!(
                "{}\t{}\t{}\t{}\t{}",
                format!("{id:>PRINT_WIDTH$}").red(),
                format!("{:>PRINT_WIDTH$}", summary.depth).blue(),
                format!("{:>PRINT_WIDTH$}", summary.n_objects).green(),
                format!("{:>PRINT_WIDTH$.PRINT_PREC_WIDTH$}", summary.homogeneity).yellow(),
                rule.cyan(),
            );
        }

        println!(
            "{:->FULL_WIDTH$}\n+ {} {}\n+ {} {:.PRINT_PREC_WIDTH$}\n{:=>FULL_WIDTH$}",
            "",
            "Leaves:".bold(),
            self.n_leaves().to_string().bold().green(),
            "Mean homogeneity:".bold(),
            self.mean_homogeneity_in_leaves(),
            "",
        );
    }


    /// Write the tree to a Graphviz dot file.
    pub fn to_dot_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>,
    {
        let mut f = File::create(path)?;
        f.write_all(b"graph ClusteringTree {\n")?;
        for row in self.root.to_dot_info() {
            f.write_all(row.as_bytes())?;
        }
        f.write_all(b"}\n")?;
        Ok(())
    }


    /// Returns the structural encoding of the tree.
    pub fn to_structural_encoding(&self) -> StructuralEncoding {
        StructuralEncoding::from_node(&self.root)
    }


    /// Rebuilds a tree from its structural encoding
    /// and the sample it was built on.
    ///
    /// Returns [`ClusteringError::ReconstructionMismatch`]
    /// if `sample` does not split as encoded.
    pub fn from_structural_encoding(
        sample: &'a Sample,
        encoding: &StructuralEncoding,
    ) -> Result<Self>
    {
        let rows = (0..sample.shape().0).collect::<Vec<_>>();
        let root = encoding.decode(sample, rows, None)?;
        info!(
            n_sample = sample.shape().0,
            n_leaves = root.n_leaves(),
            "reconstructed a clustering tree"
        );
        Ok(Self::new(sample, root))
    }


    /// Writes the structural encoding to the JSON file `path`.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_structural_encoding().to_json_file(path)
    }


    /// Reads a structural encoding from the JSON file `path`
    /// and rebuilds the tree on `sample`.
    pub fn from_json_file<P>(sample: &'a Sample, path: P) -> Result<Self>
        where P: AsRef<Path>,
    {
        let encoding = StructuralEncoding::from_json_file(path)?;
        Self::from_structural_encoding(sample, &encoding)
    }
}
