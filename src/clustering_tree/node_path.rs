//! Positional numbering of the nodes of a binary tree.
//!
//! The root has id `0` and the children of the node `p` have
//! ids `2p + 1` (left) and `2p + 2` (right).
//! Hence the id of a node alone determines the path from the root,
//! whatever the way the nodes are stored.
use super::split_rule::LeftRight;

use std::slice::Iter;


/// The sequence of steps from the root to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath(Vec<LeftRight>);


impl NodePath {
    /// Decodes the path from the root to the node `id`.
    pub fn from_id(id: usize) -> Self {
        let mut steps = Vec::new();
        let mut n = id;
        while n != 0 {
            n -= 1;
            let step = if n % 2 == 0 { LeftRight::Left } else { LeftRight::Right };
            steps.push(step);
            n /= 2;
        }
        steps.reverse();
        Self(steps)
    }


    /// Encodes the path back to the id of the node it leads to.
    pub fn to_id(&self) -> usize {
        self.0.iter()
            .fold(0, |id, step| match step {
                LeftRight::Left  => 2 * id + 1,
                LeftRight::Right => 2 * id + 2,
            })
    }


    /// Returns the steps from the root.
    pub fn iter(&self) -> Iter<'_, LeftRight> {
        self.0.iter()
    }


    /// Returns the number of steps, i.e., the depth of the node.
    pub fn len(&self) -> usize {
        self.0.len()
    }


    /// Returns `true` if the path leads to the root.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}


/// Returns the id of the left child of the node `id`,
/// or `None` if it exceeds `usize::MAX`.
#[inline]
pub fn left_child_id(id: usize) -> Option<usize> {
    id.checked_mul(2)?.checked_add(1)
}


/// Returns the id of the right child of the node `id`,
/// or `None` if it exceeds `usize::MAX`.
#[inline]
pub fn right_child_id(id: usize) -> Option<usize> {
    id.checked_mul(2)?.checked_add(2)
}
