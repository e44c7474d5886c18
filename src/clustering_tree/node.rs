//! A node struct used in the clustering tree.
use crate::error::{ClusteringError, Result};
use super::{
    depth::Depth,
    node_path::{left_child_id, right_child_id},
    split_rule::{DivisionRule, LeftRight},
};

use std::fmt;


/// A node of a clustering tree.
///
/// - `Leaf` keeps the rows that reached it
///   (as indices into the sample the tree was built on).
/// - `Branch` owns its two children.
///   Its rows are the concatenation of the rows of its leaves.
///
/// `id` is `None` until the tree numbers its nodes;
/// `parent` is the id of the parent node and `None` for the root.
#[derive(Clone, PartialEq)]
pub enum Node {
    /// A node that has two children.
    Branch {
        /// Position of this node in the tree.
        id:          Option<usize>,
        /// Id of the parent node.
        parent:      Option<usize>,
        /// The rule that separates the children.
        rule:        DivisionRule,
        /// The size-weighted homogeneity of the children.
        homogeneity: f64,
        /// The number of rows in this subtree.
        n_objects:   usize,
        /// Rows with `feature <= threshold`.
        left:        Box<Node>,
        /// Rows with `feature > threshold`.
        right:       Box<Node>,
    },
    /// A node that has no child.
    Leaf {
        /// Position of this node in the tree.
        id:          Option<usize>,
        /// Id of the parent node.
        parent:      Option<usize>,
        /// The homogeneity of the rows of this leaf.
        homogeneity: f64,
        /// The rows of this leaf, in sample order.
        value:       Vec<usize>,
    },
}


/// A flat description of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSummary {
    /// Id of the node (`None` before numbering).
    pub id: Option<usize>,
    /// Depth of the node; the root is at depth `0`.
    pub depth: Depth,
    /// Homogeneity stored in the node.
    pub homogeneity: f64,
    /// Label of the division rule, empty for leaves.
    pub rule: String,
    /// The number of rows in the subtree.
    pub n_objects: usize,
}


impl Node {
    /// Construct a leaf holding `value`.
    pub fn leaf(homogeneity: f64, value: Vec<usize>) -> Self {
        Self::Leaf { id: None, parent: None, homogeneity, value, }
    }


    /// Construct a branch.
    /// The number of rows is the sum over the two children.
    pub fn branch(
        rule:        DivisionRule,
        homogeneity: f64,
        left:        Box<Node>,
        right:       Box<Node>,
    ) -> Self
    {
        let n_objects = left.n_objects() + right.n_objects();
        Self::Branch {
            id: None,
            parent: None,
            rule,
            homogeneity,
            n_objects,
            left,
            right,
        }
    }


    /// Returns the id of this node.
    pub fn id(&self) -> Option<usize> {
        match self {
            Self::Branch { id, .. } | Self::Leaf { id, .. } => *id,
        }
    }


    /// Returns the id of the parent node.
    pub fn parent(&self) -> Option<usize> {
        match self {
            Self::Branch { parent, .. } | Self::Leaf { parent, .. } => *parent,
        }
    }


    /// Returns `true` if `self` is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }


    /// Returns the homogeneity stored in this node.
    pub fn homogeneity(&self) -> f64 {
        match self {
            Self::Branch { homogeneity, .. }
            | Self::Leaf { homogeneity, .. } => *homogeneity,
        }
    }


    /// Returns the number of rows in this subtree.
    pub fn n_objects(&self) -> usize {
        match self {
            Self::Branch { n_objects, .. } => *n_objects,
            Self::Leaf { value, .. } => value.len(),
        }
    }


    /// Returns the division rule of a branch.
    pub fn rule(&self) -> Option<&DivisionRule> {
        match self {
            Self::Branch { rule, .. } => Some(rule),
            Self::Leaf { .. } => None,
        }
    }


    /// Returns the rows of a leaf.
    pub fn value(&self) -> Option<&[usize]> {
        match self {
            Self::Branch { .. } => None,
            Self::Leaf { value, .. } => Some(&value[..]),
        }
    }


    /// Returns the left child of a branch.
    pub fn left(&self) -> Option<&Node> {
        self.child(LeftRight::Left)
    }


    /// Returns the right child of a branch.
    pub fn right(&self) -> Option<&Node> {
        self.child(LeftRight::Right)
    }


    /// Returns the child on `side`, or `None` for a leaf.
    pub fn child(&self, side: LeftRight) -> Option<&Node> {
        match (self, side) {
            (Self::Branch { left, .. }, LeftRight::Left) => Some(left.as_ref()),
            (Self::Branch { right, .. }, LeftRight::Right) => Some(right.as_ref()),
            (Self::Leaf { .. }, _) => None,
        }
    }


    /// Numbers the nodes of this subtree in pre-order.
    /// `self` gets `id`, and its children get
    /// `2 * id + 1` and `2 * id + 2`.
    ///
    /// Returns [`ClusteringError::NodeIdOverflow`]
    /// if a child id exceeds `usize::MAX`.
    pub(crate) fn assign_ids(
        &mut self,
        node_id: usize,
        parent_id: Option<usize>,
    ) -> Result<()>
    {
        match self {
            Self::Branch { id, parent, left, right, .. } => {
                *id = Some(node_id);
                *parent = parent_id;

                let overflow = || ClusteringError::NodeIdOverflow(node_id);
                let left_id = left_child_id(node_id).ok_or_else(overflow)?;
                let right_id = right_child_id(node_id).ok_or_else(overflow)?;
                left.assign_ids(left_id, Some(node_id))?;
                right.assign_ids(right_id, Some(node_id))
            },
            Self::Leaf { id, parent, .. } => {
                *id = Some(node_id);
                *parent = parent_id;
                Ok(())
            },
        }
    }


    /// Returns the pair of the sum of the homogeneity over leaves
    /// and the number of leaves.
    pub fn sum_homogeneity_in_leaves(&self) -> (f64, usize) {
        match self {
            Self::Branch { left, right, .. } => {
                let (lh, ln) = left.sum_homogeneity_in_leaves();
                let (rh, rn) = right.sum_homogeneity_in_leaves();
                (lh + rh, ln + rn)
            },
            Self::Leaf { homogeneity, .. } => (*homogeneity, 1),
        }
    }


    /// Returns the number of leaves of this subtree.
    pub fn n_leaves(&self) -> usize {
        self.sum_homogeneity_in_leaves().1
    }


    /// Returns the rows of this subtree:
    /// the rows of the leaves from left to right.
    pub fn rows_in_subtree(&self) -> Vec<usize> {
        let mut rows = Vec::with_capacity(self.n_objects());
        self.collect_rows(&mut rows);
        rows
    }


    fn collect_rows(&self, rows: &mut Vec<usize>) {
        match self {
            Self::Branch { left, right, .. } => {
                left.collect_rows(rows);
                right.collect_rows(rows);
            },
            Self::Leaf { value, .. } => {
                rows.extend_from_slice(value);
            },
        }
    }


    /// Appends the summary of this subtree in pre-order.
    pub(crate) fn summaries(&self, depth: Depth, out: &mut Vec<NodeSummary>) {
        let rule = self.rule()
            .map(|rule| rule.to_string())
            .unwrap_or_default();
        out.push(NodeSummary {
            id: self.id(),
            depth,
            homogeneity: self.homogeneity(),
            rule,
            n_objects: self.n_objects(),
        });

        if let Self::Branch { left, right, .. } = self {
            left.summaries(depth.next(), out);
            right.summaries(depth.next(), out);
        }
    }


    /// Returns the graphviz lines of this subtree.
    /// Nodes are named after their ids.
    pub(crate) fn to_dot_info(&self) -> Vec<String> {
        let id = dot_id(self.id());
        match self {
            Self::Branch { rule, homogeneity, n_objects, left, right, .. } => {
                let mut info = vec![format!(
                    "\tnode_{id} [ label = \"#{id}: {rule} ?\\n\
                     n = {n_objects}, h = {homogeneity:.3}\" ];\n",
                )];

                let left_id = dot_id(left.id());
                let right_id = dot_id(right.id());
                info.append(&mut left.to_dot_info());
                info.append(&mut right.to_dot_info());

                info.push(format!(
                    "\tnode_{id} -- node_{left_id} [ label = \"No\" ];\n",
                ));
                info.push(format!(
                    "\tnode_{id} -- node_{right_id} [ label = \"Yes\" ];\n",
                ));
                info
            },
            Self::Leaf { homogeneity, value, .. } => {
                let n_objects = value.len();
                let info = format!(
                    "\tnode_{id} [ label = \"#{id}\\n\
                     n = {n_objects}, h = {homogeneity:.3}\", shape = box ];\n",
                );
                vec![info]
            },
        }
    }
}


fn dot_id(id: Option<usize>) -> String {
    id.map(|id| id.to_string())
        .unwrap_or_else(|| "unassigned".to_string())
}


impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch {
                id,
                rule,
                homogeneity,
                n_objects,
                left,
                right,
                ..
            } => {
                f.debug_struct("Branch")
                    .field("id", &id)
                    .field("rule", &rule.to_string())
                    .field("homogeneity", &homogeneity)
                    .field("n_objects", &n_objects)
                    .field("left", &left)
                    .field("right", &right)
                    .finish()
            },
            Self::Leaf {
                id,
                homogeneity,
                value,
                ..
            } => {
                f.debug_struct("Leaf")
                    .field("id", &id)
                    .field("homogeneity", &homogeneity)
                    .field("n_objects", &value.len())
                    .finish()
            },
        }
    }
}
