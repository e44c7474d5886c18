//! Structural encoding of a clustering tree.
//!
//! The encoding keeps the shape of a tree
//! (ids, rules, homogeneity values, and subtree sizes)
//! but not its rows.
//! Given the sample the tree was built on,
//! the rows of every node are derived again by replaying the rules.
use serde::{Serialize, Deserialize};
use tracing::debug;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use super::{
    node::Node,
    split_rule::DivisionRule,
};
use crate::Sample;
use crate::error::{ClusteringError, Result};


/// Separator between the fields of a node label.
const LABEL_SEPARATOR: &str = ", ";

/// Encoded id of a node that has not been numbered.
/// Any negative id decodes as unnumbered.
const UNASSIGNED_ID: &str = "-1";


/// The data-independent form of a (sub)tree.
///
/// In JSON, a node reads as
/// ```json
/// { "n": "0, f >0, 0.25", "d": 4, "c": [ { ... }, { ... } ] }
/// ```
/// - `n` is the label `"<id>, <rule>, <homogeneity>"` for a branch
///   and `"<id>, <homogeneity>"` for a leaf,
/// - `d` is the number of rows in the subtree,
/// - `c` is empty for a leaf and holds the left and right children
///   for a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralEncoding {
    /// Label of the node.
    #[serde(rename = "n")]
    pub label: String,
    /// Number of rows in the subtree.
    #[serde(rename = "d")]
    pub n_objects: usize,
    /// Children of the node, left then right.
    #[serde(rename = "c")]
    pub children: Vec<StructuralEncoding>,
}


/// The decoded fields of a node label.
#[derive(Debug, Clone, PartialEq)]
struct Label {
    id: Option<usize>,
    rule: Option<DivisionRule>,
    homogeneity: f64,
}


impl Label {
    fn parse(label: &str) -> Result<Self> {
        let malformed = || {
            let msg = format!("`{label}` is not a node label");
            ClusteringError::MalformedEncoding(msg)
        };

        let (id, rest) = label.split_once(LABEL_SEPARATOR)
            .ok_or_else(malformed)?;
        let id = parse_id(id.trim()).ok_or_else(malformed)?;

        let (rule, homogeneity) = match rest.rsplit_once(LABEL_SEPARATOR) {
            Some((rule, homogeneity)) => (Some(rule.parse()?), homogeneity),
            None => (None, rest),
        };
        let homogeneity = homogeneity.trim()
            .parse::<f64>()
            .map_err(|_| malformed())?;

        Ok(Self { id, rule, homogeneity, })
    }
}


/// Parses an encoded id.
/// Returns `Some(None)` for a negative (unassigned) id
/// and `None` if `id` is not an integer.
fn parse_id(id: &str) -> Option<Option<usize>> {
    if let Ok(id) = id.parse::<usize>() {
        return Some(Some(id));
    }
    let digits = id.strip_prefix('-')?;
    let is_integer = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit());
    is_integer.then_some(None)
}


impl StructuralEncoding {
    /// Encodes the subtree rooted at `node`.
    pub fn from_node(node: &Node) -> Self {
        let id = node.id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| UNASSIGNED_ID.to_string());
        let homogeneity = node.homogeneity();

        match node {
            Node::Branch { rule, left, right, n_objects, .. } => {
                let children = vec![Self::from_node(left), Self::from_node(right)];
                Self {
                    label: format!("{id}{LABEL_SEPARATOR}{rule}{LABEL_SEPARATOR}{homogeneity}"),
                    n_objects: *n_objects,
                    children,
                }
            },
            Node::Leaf { value, .. } => {
                Self {
                    label: format!("{id}{LABEL_SEPARATOR}{homogeneity}"),
                    n_objects: value.len(),
                    children: Vec::new(),
                }
            },
        }
    }


    /// Rebuilds the subtree of `self` on the rows `rows` of `sample`.
    ///
    /// At every node, the number of rows that reach the node must be
    /// the encoded one. Otherwise `sample` is not the sample that
    /// produced the encoding and this method returns
    /// [`ClusteringError::ReconstructionMismatch`].
    /// Homogeneity values are taken from the encoding, not recomputed.
    pub fn decode(
        &self,
        sample: &Sample,
        rows: Vec<usize>,
        parent: Option<usize>,
    ) -> Result<Node>
    {
        let label = Label::parse(&self.label)?;

        if rows.len() != self.n_objects {
            return Err(ClusteringError::ReconstructionMismatch {
                id: label.id,
                expected: self.n_objects,
                actual: rows.len(),
            });
        }

        let id = label.id;
        match (&self.children[..], label.rule) {
            ([], None) => {
                Ok(Node::Leaf {
                    id,
                    parent,
                    homogeneity: label.homogeneity,
                    value: rows,
                })
            },
            ([left, right], Some(rule)) => {
                let (lrows, rrows) = rule.partition(sample, &rows)?;
                debug!(
                    id = ?label.id,
                    %rule,
                    left = lrows.len(),
                    right = rrows.len(),
                    "replayed rule"
                );
                let left  = left.decode(sample, lrows, id)?;
                let right = right.decode(sample, rrows, id)?;
                Ok(Node::Branch {
                    id,
                    parent,
                    rule,
                    homogeneity: label.homogeneity,
                    n_objects: self.n_objects,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            },
            (children, rule) => {
                let msg = format!(
                    "node `{}` has {} children and {} rule",
                    self.label,
                    children.len(),
                    if rule.is_some() { "a" } else { "no" },
                );
                Err(ClusteringError::MalformedEncoding(msg))
            },
        }
    }


    /// Serializes `self` to a JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }


    /// Deserializes a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let encoding = serde_json::from_str(json)?;
        Ok(encoding)
    }


    /// Writes `self` to the JSON file `path`.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json_string()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }


    /// Reads an encoding from the JSON file `path`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }
}


impl From<&Node> for StructuralEncoding {
    fn from(node: &Node) -> Self {
        Self::from_node(node)
    }
}
